pub mod export;
pub mod json;
pub mod md;

use crate::error::Result;
use crate::types::config::Settings;
use crate::types::report::Report;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: Report<'_>, format: OutputFormat, settings: &Settings) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::to_json(report)?),
        OutputFormat::Md => Ok(md::to_markdown(report, &md::Style::from(settings))),
    }
}
