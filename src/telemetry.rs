use crate::error::{CourtsideError, Result};
use tracing_subscriber::EnvFilter;

/// Picks the filter directive: `--quiet`, then `RUST_LOG`, then `-v` flags,
/// then the configured level.
pub(crate) fn directive(
    verbose: u8,
    quiet: bool,
    env_filter: Option<&str>,
    configured_level: &str,
) -> String {
    if quiet {
        return "error".to_string();
    }
    if let Some(filter) = env_filter.filter(|filter| !filter.trim().is_empty()) {
        return filter.to_string();
    }
    match verbose {
        0 => configured_level.to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

pub fn init(verbose: u8, quiet: bool, configured_level: &str) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let value = directive(verbose, quiet, env.as_deref(), configured_level);
    let env_filter = EnvFilter::try_new(&value).map_err(|source| {
        CourtsideError::Telemetry(format!("invalid log level/filter '{value}': {source}"))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|err| CourtsideError::Telemetry(err.to_string()))
}
