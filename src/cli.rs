use crate::error::Result;
use crate::store::records::{MatchCategory, PlayerId};
use crate::store::scope::{ScopeFilter, Window};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "courtside",
    version,
    about = "Basketball roster tracking and player evaluation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Reference date for eligibility (YYYY-MM-DD, defaults to the local date)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rate the roster, or a single player with the full breakdown
    Rate(RateCommand),
    /// Team average, best and lowest rating
    Team(TeamCommand),
    /// Training attendance board
    Attendance(AttendanceCommand),
    /// Roster with eligibility status
    Roster(RosterCommand),
    /// Consistency checks over the team data
    Check(CheckCommand),
    /// Mark a player as inactive
    Deactivate(DeactivateCommand),
}

impl Commands {
    /// Team directory the command operates on.
    pub fn path(&self) -> &Path {
        match self {
            Commands::Rate(cmd) => &cmd.path,
            Commands::Team(cmd) => &cmd.path,
            Commands::Attendance(cmd) => &cmd.path,
            Commands::Roster(cmd) => &cmd.path,
            Commands::Check(cmd) => &cmd.path,
            Commands::Deactivate(cmd) => &cmd.path,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CategoryArg {
    PreSeason,
    RegularSeason,
    PostSeason,
    Tournament,
}

impl From<CategoryArg> for MatchCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::PreSeason => MatchCategory::PreSeason,
            CategoryArg::RegularSeason => MatchCategory::RegularSeason,
            CategoryArg::PostSeason => MatchCategory::PostSeason,
            CategoryArg::Tournament => MatchCategory::Tournament,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct WindowArgs {
    /// Seven days starting at this date
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub week: Option<NaiveDate>,
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl WindowArgs {
    pub fn to_window(&self) -> Result<Window> {
        match (self.week, self.from, self.to) {
            (Some(start), _, _) => Ok(Window::Week(start)),
            (None, Some(from), Some(to)) => Window::range(from, to),
            _ => Ok(Window::All),
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct ScopeArgs {
    #[command(flatten)]
    pub window: WindowArgs,
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

impl ScopeArgs {
    pub fn to_filter(&self) -> Result<ScopeFilter> {
        Ok(ScopeFilter {
            window: self.window.to_window()?,
            category: self.category.map(MatchCategory::from),
        })
    }
}

#[derive(Args)]
pub struct RateCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub player: Option<PlayerId>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub scope: ScopeArgs,
    /// Also write the JSON report under .courtside/reports
    #[arg(long)]
    pub export: bool,
}

#[derive(Args)]
pub struct TeamCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Args)]
pub struct AttendanceCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Args)]
pub struct RosterCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Include deactivated players
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CheckCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct DeactivateCommand {
    pub path: PathBuf,
    pub player_id: PlayerId,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
