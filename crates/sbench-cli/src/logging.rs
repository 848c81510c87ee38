//! Installs the process-wide tracing subscriber from the logging config.

use sbench_core::config::LoggingConfig;
use tracing::Level;

pub fn parse_level(level: &str) -> Result<Level, String> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(format!("unknown log level: {other}")),
    }
}

/// Logs go to stderr so stdout stays reserved for results. A subscriber
/// installed earlier in the process is left in place.
pub fn init(cfg: &LoggingConfig) -> Result<(), String> {
    let level = parse_level(&cfg.level)?;
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match cfg.format.trim().to_lowercase().as_str() {
        "json" => builder.json().try_init().is_ok(),
        "console" => builder.try_init().is_ok(),
        other => return Err(format!("unknown log format: {other}")),
    };
    if !installed {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
