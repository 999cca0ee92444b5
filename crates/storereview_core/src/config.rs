//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the review server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_body_size: usize,
    pub auto_backup: bool,
}

fn expand_tilde(path: String) -> String {
    match (path.strip_prefix("~/"), resolve_home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ => path,
    }
}

/// Resolve the user's home directory, falling back to the working directory.
fn resolve_home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
///
/// # Arguments
/// - `name`: Environment variable name.
///
/// # Returns
/// `true` when the value is a recognized truthy value.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH")
                .map(expand_tilde)
                .unwrap_or_else(|_| default_db_path()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),
            auto_backup: env_flag_enabled("AUTO_BACKUP"),
        }
    }
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("storereview")
        .join("db")
        .to_string_lossy()
        .to_string()
}
