//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use astroschedule_core::LogConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "ASTROSCHEDULE_LOG";

/// Filter directive for the given config and `-v` count.
pub fn filter_directive(config: &LogConfig, verbose: u8) -> String {
    match verbose {
        0 => config.level.clone(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr unless `config.file`
/// is set, in which case they are appended to that file.
pub fn init(config: &LogConfig, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(filter_directive(config, verbose)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| e.to_string())?;
        }
        None => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| e.to_string())?,
    }
    Ok(())
}
