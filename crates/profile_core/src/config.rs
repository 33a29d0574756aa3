//! Runtime configuration for the profile page.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Unknown fields are rejected so typos do not silently fall back.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const DEFAULT_ADMIN_ENTRY_PATH: &str = "admin/index.html";
pub const DEFAULT_ADMIN_SECRET: &str = "lxd123";
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;
pub const DEFAULT_LOCKOUT_MINUTES: u32 = 5;
pub const DEFAULT_NOTICE_DURATION_MS: i64 = 3_000;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Access gate tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Relative path the browser is sent to after a successful login.
    pub admin_entry_path: String,
    /// Secret in effect while `adminPassword` is unset.
    pub default_admin_secret: String,
    pub max_login_attempts: u32,
    pub lockout_ms: i64,
    pub notice_duration_ms: i64,
}

impl Default for GateConfig {
    fn default() -> Self {
        ProfileConfig::default().gate()
    }
}

/// Top-level config, usually loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub admin_entry_path: String,
    pub default_admin_secret: String,
    pub max_login_attempts: u32,
    pub lockout_minutes: u32,
    pub notice_duration_ms: i64,
    /// Offset used for `HH:MM` and `YYYY-MM-DD` message dates.
    /// `None` uses the host's local offset at start-up.
    pub display_utc_offset_minutes: Option<i32>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            admin_entry_path: DEFAULT_ADMIN_ENTRY_PATH.to_string(),
            default_admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            lockout_minutes: DEFAULT_LOCKOUT_MINUTES,
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            display_utc_offset_minutes: None,
        }
    }
}

impl ProfileConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_login_attempts == 0 {
            return Err(ConfigError::Invalid("max_login_attempts must be at least 1"));
        }
        if self.default_admin_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("default_admin_secret must not be empty"));
        }
        if self.notice_duration_ms < 0 {
            return Err(ConfigError::Invalid("notice_duration_ms must not be negative"));
        }
        if let Some(minutes) = self.display_utc_offset_minutes {
            if minutes.abs() >= 24 * 60 {
                return Err(ConfigError::Invalid(
                    "display_utc_offset_minutes must be within one day",
                ));
            }
        }
        Ok(())
    }

    pub fn gate(&self) -> GateConfig {
        GateConfig {
            admin_entry_path: self.admin_entry_path.clone(),
            default_admin_secret: self.default_admin_secret.clone(),
            max_login_attempts: self.max_login_attempts,
            lockout_ms: i64::from(self.lockout_minutes) * 60 * 1000,
            notice_duration_ms: self.notice_duration_ms,
        }
    }

    /// Resolves the display offset, falling back to the host's local offset.
    pub fn display_offset(&self) -> chrono::FixedOffset {
        use chrono::Offset;

        self.display_utc_offset_minutes
            .and_then(|minutes| chrono::FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(|| chrono::Local::now().offset().fix())
    }
}
