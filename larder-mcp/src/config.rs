//! Server configuration from the environment

use std::env;

const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `tracing` filter directive, e.g. "info" or "larder_units=debug"
    pub log_filter: String,
    /// Colour escape codes in stderr logs
    pub log_ansi: bool,
}

impl Config {
    /// Read `LARDER_LOG` (falling back to `RUST_LOG`) and `LARDER_LOG_ANSI`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("LARDER_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        // stdout carries the protocol; stderr is often a log file, so colour is opt-out
        let log_ansi = lookup("LARDER_LOG_ANSI")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Config { log_filter, log_ansi }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_ansi: true,
        }
    }
}
