//! File logging.
//!
//! The terminal is owned by the UI while running, so log records only ever
//! go to the file named by `TAPE_TODO_LOG`.

use std::fs::OpenOptions;
use std::io;

use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::EnvConfig;

/// Install the global file logger if a log file is configured.
///
/// Returns `Ok(false)` when logging is disabled.
pub fn init(config: &EnvConfig) -> io::Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(config.log_level, log_config, file).map_err(io::Error::other)?;
    log::info!("logging to {} at {}", path.display(), config.log_level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::init;
    use crate::config::EnvConfig;

    #[test]
    fn disabled_without_log_file() {
        let config = EnvConfig::default();
        assert!(!init(&config).expect("init"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let config = EnvConfig {
            log_file: Some("/nonexistent-dir/tape_todo.log".into()),
            ..EnvConfig::default()
        };
        assert!(init(&config).is_err());
    }
}
