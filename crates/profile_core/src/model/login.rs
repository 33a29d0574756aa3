//! Persisted access gate counters.

use serde::{Deserialize, Serialize};

/// Stored under `loginAttempts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginAttempts {
    pub attempt_count: u32,
    pub last_attempt_time: i64,
}

/// Stored under `loginLockData`. Times are epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginLockData {
    pub is_locked: bool,
    pub lock_time: i64,
    pub unlock_time: i64,
}

impl LoginLockData {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.unlock_time
    }
}
