//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::core::line_editor::DEFAULT_MAX_LEN;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Log file; logging is off when unset.
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub fps: u32,
    /// Longest entry, in bytes, the line editor accepts.
    pub max_entry_len: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: LevelFilter::Info,
            fps: DEFAULT_FPS,
            max_entry_len: DEFAULT_MAX_LEN,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_file: env_string_opt("TAPE_TODO_LOG").map(PathBuf::from),
            log_level: env_parse("TAPE_TODO_LOG_LEVEL").unwrap_or(defaults.log_level),
            fps: env_parse("TAPE_TODO_FPS")
                .filter(|fps| (1..=MAX_FPS).contains(fps))
                .unwrap_or(defaults.fps),
            max_entry_len: env_parse("TAPE_TODO_MAX_ENTRY")
                .filter(|len| *len > 0)
                .unwrap_or(defaults.max_entry_len),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}
