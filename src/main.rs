mod cli;
mod config;
mod engine;
mod error;
mod report;
mod roster;
mod store;
mod telemetry;
mod types;

use crate::error::{CourtsideError, Result};
use crate::store::records::PlayerId;
use crate::store::scope::{Scope, ScopeFilter};
use crate::store::{JsonFileStore, TeamStore};
use crate::types::config::Settings;
use crate::types::report::{AttendanceReport, RatingReport, Report, RosterReport, TeamReport};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    let root = cli.command.path().to_path_buf();
    if !root.exists() {
        return Err(CourtsideError::PathNotFound(root.display().to_string()));
    }

    let loaded = config::load_config(&root)?;
    let settings = Settings::resolve(loaded.as_ref());
    telemetry::init(cli.verbose, cli.quiet, &settings.log_level)?;

    let missing_config = loaded.is_none();
    if missing_config {
        eprintln!("warning: no courtside.toml found in {}", root.display());
    }

    let store = JsonFileStore::new(root.join(&settings.data_file));
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!(
        team = %settings.team_name,
        data = %store.path().display(),
        "courtside v{}",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        cli::Commands::Rate(cmd) => rate(&store, &settings, &root, &cmd),
        cli::Commands::Team(cmd) => team(&store, &settings, &cmd),
        cli::Commands::Attendance(cmd) => attendance(&store, &settings, &cmd),
        cli::Commands::Roster(cmd) => roster_list(&store, &settings, &cmd, today),
        cli::Commands::Check(_) => check(&store, today, missing_config),
        cli::Commands::Deactivate(cmd) => deactivate(&store, cmd.player_id),
    }
}

fn rate(
    store: &dyn TeamStore,
    settings: &Settings,
    root: &Path,
    cmd: &cli::RateCommand,
) -> Result<i32> {
    let snapshot = store.load()?;
    let filter = cmd.scope.to_filter()?;
    let scope = Scope::resolve(&snapshot, &filter);

    let evaluations = match cmd.player {
        Some(player_id) => {
            if snapshot.player(player_id).is_none() {
                tracing::warn!(player = player_id, "rating requested for unknown player");
                eprintln!("warning: player {player_id} not found; showing the neutral rating");
            }
            vec![engine::evaluate_player(
                &snapshot,
                &scope,
                player_id,
                settings.played_policy,
            )]
        }
        None => engine::evaluate_roster(&snapshot, &scope, settings.played_policy),
    };

    let ratings = RatingReport::new(
        &settings.team_name,
        &filter,
        settings.played_policy,
        evaluations,
    );
    let rendered = report::render(
        Report::Ratings(&ratings),
        output_format(cmd.format),
        settings,
    )?;
    println!("{rendered}");

    if cmd.export {
        let path = report::export::write_report(root, &ratings)?;
        println!("report file: {}", path.display());
    }
    Ok(exit_code::SUCCESS)
}

fn team(store: &dyn TeamStore, settings: &Settings, cmd: &cli::TeamCommand) -> Result<i32> {
    let snapshot = store.load()?;
    let filter = cmd.scope.to_filter()?;
    let scope = Scope::resolve(&snapshot, &filter);
    let evaluations = engine::evaluate_roster(&snapshot, &scope, settings.played_policy);

    let team_report = TeamReport {
        team: settings.team_name.clone(),
        scope: filter.to_string(),
        summary: engine::team_summary(&evaluations, settings.team_average_excludes_zero),
    };
    let rendered = report::render(
        Report::Team(&team_report),
        output_format(cmd.format),
        settings,
    )?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn attendance(
    store: &dyn TeamStore,
    settings: &Settings,
    cmd: &cli::AttendanceCommand,
) -> Result<i32> {
    let snapshot = store.load()?;
    let filter = ScopeFilter {
        window: cmd.window.to_window()?,
        category: None,
    };
    let scope = Scope::resolve(&snapshot, &filter);

    let board = AttendanceReport {
        team: settings.team_name.clone(),
        scope: filter.to_string(),
        rows: engine::board::attendance_board(&snapshot, &scope),
        skipped_sessions: scope.malformed_sessions.clone(),
    };
    let rendered = report::render(
        Report::Attendance(&board),
        output_format(cmd.format),
        settings,
    )?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn roster_list(
    store: &dyn TeamStore,
    settings: &Settings,
    cmd: &cli::RosterCommand,
    today: NaiveDate,
) -> Result<i32> {
    let snapshot = store.load()?;
    let listing = RosterReport {
        team: settings.team_name.clone(),
        as_of: today,
        entries: roster::roster_entries(&snapshot, cmd.all, today),
    };
    let rendered = report::render(
        Report::Roster(&listing),
        output_format(cmd.format),
        settings,
    )?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn check(store: &dyn TeamStore, today: NaiveDate, missing_config: bool) -> Result<i32> {
    let snapshot = store.load()?;
    let findings = engine::checks::check_snapshot(&snapshot, today);

    if findings.is_empty() {
        println!("check: no findings");
    }
    for finding in &findings {
        let level = if finding.blocking { "BLOCKING" } else { "WARN" };
        println!("[{}] {}: {}", level, finding.id, finding.title);
        println!("  {}", finding.body);
    }

    if findings.iter().any(|finding| finding.blocking) {
        Ok(exit_code::BLOCKING)
    } else if missing_config || !findings.is_empty() {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn deactivate(store: &dyn TeamStore, player_id: PlayerId) -> Result<i32> {
    let mut snapshot = store.load()?;
    if roster::deactivate(&mut snapshot, player_id)? {
        store.save(&snapshot)?;
        println!("deactivated player {player_id}");
    } else {
        println!("player {player_id} is already inactive");
    }
    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
