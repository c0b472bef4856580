//! Logging configuration shared by hosts.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host binary.

use serde::{Deserialize, Serialize};
use tracing::Level;

/// How the host should set up logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Write log lines to stderr
    pub console_output: bool,
    /// Colourise console output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Configured level, INFO when the string is not recognised
    pub fn parse_level(&self) -> Level {
        self.level.trim().parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let mut config = LogConfig::default();
        assert_eq!(config.parse_level(), Level::INFO);
        config.level = "DEBUG".to_string();
        assert_eq!(config.parse_level(), Level::DEBUG);
        config.level = "chatty".to_string();
        assert_eq!(config.parse_level(), Level::INFO);
    }
}
