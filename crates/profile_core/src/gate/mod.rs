//! Admin entry access gate.
//!
//! # Responsibility
//! - Collect a password, compare it to the stored or default secret.
//! - Persist failed attempts and enforce a timed lockout.
//!
//! # Invariants
//! - While locked, submissions are rejected before any comparison.
//! - Empty input never consumes an attempt.
//! - Reading lock state clears both records once the unlock time passed.
//! - Closing the prompt never touches persisted counters.
//! - The secret is never logged or echoed in feedback.

use crate::clock::Clock;
use crate::config::GateConfig;
use crate::keys;
use crate::model::login::{LoginAttempts, LoginLockData};
use crate::notice::{Notice, NoticeKind};
use crate::store::{KeyValueStore, StoreJsonExt, StoreResult};
use log::{info, warn};

const MINUTE_MS: i64 = 60 * 1000;

pub const EMPTY_PASSWORD_TEXT: &str = "请输入密码";
pub const DEFAULT_SECRET_WARNING_TEXT: &str = "首次登录，请修改默认密码";

/// Collaborators a gate transition reads and writes.
#[derive(Clone, Copy)]
pub struct GateContext<'a> {
    /// Shared persistent store holding the secret and counters.
    pub store: &'a dyn KeyValueStore,
    /// Session-scoped store receiving the login timestamp.
    pub session: &'a dyn KeyValueStore,
    pub clock: &'a dyn Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    PromptOpen,
}

/// Where user-facing feedback goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Shown inside the open prompt.
    Inline(String),
    /// Shown as a toast; used whenever no prompt is open.
    Toast(Notice),
}

impl Feedback {
    pub fn text(&self) -> &str {
        match self {
            Self::Inline(text) => text,
            Self::Toast(notice) => &notice.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    PromptShown,
    AlreadyOpen,
    Locked {
        remaining_minutes: i64,
        feedback: Feedback,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    NotOpen,
    EmptyPassword {
        feedback: Feedback,
    },
    /// Rejected without comparison; the prompt was closed.
    Locked {
        remaining_minutes: i64,
        feedback: Feedback,
    },
    /// Wrong password, prompt stays open.
    Rejected {
        remaining_attempts: u32,
        feedback: Feedback,
    },
    /// Wrong password that reached the limit; the prompt was closed.
    LockedOut {
        unlock_time_ms: i64,
        feedback: Feedback,
    },
    Authenticated {
        redirect: String,
        /// Present when the factory default secret was used.
        warning: Option<Notice>,
    },
}

/// Lock state as seen after self-healing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockStatus {
    pub is_locked: bool,
    pub attempt_count: u32,
    pub unlock_time_ms: i64,
}

impl LockStatus {
    /// Whole minutes until unlock, rounded up; `None` when not locked.
    pub fn remaining_minutes(&self, now_ms: i64) -> Option<i64> {
        if !self.is_locked || now_ms >= self.unlock_time_ms {
            return None;
        }
        let remaining_ms = self.unlock_time_ms - now_ms;
        Some((remaining_ms + MINUTE_MS - 1) / MINUTE_MS)
    }
}

/// Reads lock state, clearing both records when the lock has expired.
pub fn lock_status(ctx: &GateContext<'_>) -> LockStatus {
    let attempts: LoginAttempts = ctx.store.read_json(keys::LOGIN_ATTEMPTS).unwrap_or_default();
    let lock: LoginLockData = ctx.store.read_json(keys::LOGIN_LOCK_DATA).unwrap_or_default();
    let now_ms = ctx.clock.now_ms();

    if lock.is_locked && lock.is_expired(now_ms) {
        for key in [keys::LOGIN_LOCK_DATA, keys::LOGIN_ATTEMPTS] {
            if let Err(err) = ctx.store.remove(key) {
                warn!(
                    "event=gate_unlock module=gate status=error key={} error={}",
                    key, err
                );
            }
        }
        info!("event=gate_unlock module=gate status=ok");
        return LockStatus::default();
    }

    LockStatus {
        is_locked: lock.is_locked,
        attempt_count: attempts.attempt_count,
        unlock_time_ms: lock.unlock_time,
    }
}

/// Password prompt state machine guarding the admin entry point.
#[derive(Debug, Clone)]
pub struct AccessGate {
    config: GateConfig,
    state: GateState,
}

impl AccessGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Opens the prompt unless the gate is locked.
    pub fn open(&mut self, ctx: &GateContext<'_>) -> OpenOutcome {
        let now_ms = ctx.clock.now_ms();
        if let Some(remaining_minutes) = lock_status(ctx).remaining_minutes(now_ms) {
            info!(
                "event=gate_open module=gate status=locked remaining_minutes={}",
                remaining_minutes
            );
            return OpenOutcome::Locked {
                remaining_minutes,
                feedback: self.toast(locked_text(remaining_minutes), NoticeKind::Error, now_ms),
            };
        }

        if self.state == GateState::PromptOpen {
            return OpenOutcome::AlreadyOpen;
        }
        self.state = GateState::PromptOpen;
        info!("event=gate_open module=gate status=ok");
        OpenOutcome::PromptShown
    }

    /// Closes the prompt. Persisted counters are left as they are.
    pub fn cancel(&mut self) {
        if self.state == GateState::PromptOpen {
            info!("event=gate_cancel module=gate status=ok");
        }
        self.state = GateState::Idle;
    }

    /// Submits a password from the open prompt.
    pub fn submit(&mut self, ctx: &GateContext<'_>, password: &str) -> StoreResult<SubmitOutcome> {
        if self.state != GateState::PromptOpen {
            return Ok(SubmitOutcome::NotOpen);
        }

        let now_ms = ctx.clock.now_ms();
        let status = lock_status(ctx);
        if let Some(remaining_minutes) = status.remaining_minutes(now_ms) {
            self.state = GateState::Idle;
            info!(
                "event=gate_login module=gate status=locked remaining_minutes={}",
                remaining_minutes
            );
            return Ok(SubmitOutcome::Locked {
                remaining_minutes,
                feedback: self.toast(locked_text(remaining_minutes), NoticeKind::Error, now_ms),
            });
        }

        let password = password.trim();
        if password.is_empty() {
            return Ok(SubmitOutcome::EmptyPassword {
                feedback: Feedback::Inline(EMPTY_PASSWORD_TEXT.to_string()),
            });
        }

        let secret = self.effective_secret(ctx)?;
        if password == secret {
            return self.accept(ctx, &secret, now_ms);
        }
        self.reject(ctx, status, now_ms)
    }

    fn effective_secret(&self, ctx: &GateContext<'_>) -> StoreResult<String> {
        Ok(ctx
            .store
            .get(keys::ADMIN_PASSWORD)?
            .filter(|stored| !stored.is_empty())
            .unwrap_or_else(|| self.config.default_admin_secret.clone()))
    }

    fn accept(
        &mut self,
        ctx: &GateContext<'_>,
        secret: &str,
        now_ms: i64,
    ) -> StoreResult<SubmitOutcome> {
        ctx.store.remove(keys::LOGIN_ATTEMPTS)?;
        ctx.store.remove(keys::LOGIN_LOCK_DATA)?;
        ctx.session.set(keys::ADMIN_LOGIN_TIME, &now_ms.to_string())?;
        self.state = GateState::Idle;

        let uses_default = secret == self.config.default_admin_secret;
        info!(
            "event=gate_login module=gate status=ok default_secret={}",
            uses_default
        );
        let warning = uses_default.then(|| {
            Notice::new(
                DEFAULT_SECRET_WARNING_TEXT,
                NoticeKind::Warning,
                now_ms,
                self.config.notice_duration_ms,
            )
        });

        Ok(SubmitOutcome::Authenticated {
            redirect: self.config.admin_entry_path.clone(),
            warning,
        })
    }

    fn reject(
        &mut self,
        ctx: &GateContext<'_>,
        status: LockStatus,
        now_ms: i64,
    ) -> StoreResult<SubmitOutcome> {
        let attempt_count = status.attempt_count.saturating_add(1);
        ctx.store.write_json(
            keys::LOGIN_ATTEMPTS,
            &LoginAttempts {
                attempt_count,
                last_attempt_time: now_ms,
            },
        )?;

        let max_attempts = self.config.max_login_attempts;
        if attempt_count >= max_attempts {
            let unlock_time_ms = now_ms + self.config.lockout_ms;
            ctx.store.write_json(
                keys::LOGIN_LOCK_DATA,
                &LoginLockData {
                    is_locked: true,
                    lock_time: now_ms,
                    unlock_time: unlock_time_ms,
                },
            )?;
            self.state = GateState::Idle;
            warn!(
                "event=gate_login module=gate status=locked_out attempts={} unlock_time_ms={}",
                attempt_count, unlock_time_ms
            );
            let text = format!(
                "连续{}次密码错误，账户已锁定{}分钟",
                max_attempts,
                self.config.lockout_ms / MINUTE_MS
            );
            return Ok(SubmitOutcome::LockedOut {
                unlock_time_ms,
                feedback: self.toast(text, NoticeKind::Error, now_ms),
            });
        }

        let remaining_attempts = max_attempts - attempt_count;
        info!(
            "event=gate_login module=gate status=rejected attempts={} remaining={}",
            attempt_count, remaining_attempts
        );
        Ok(SubmitOutcome::Rejected {
            remaining_attempts,
            feedback: Feedback::Inline(format!(
                "密码不正确，请重试（剩余尝试次数：{remaining_attempts}）"
            )),
        })
    }

    fn toast(&self, text: String, kind: NoticeKind, now_ms: i64) -> Feedback {
        Feedback::Toast(Notice::new(text, kind, now_ms, self.config.notice_duration_ms))
    }
}

fn locked_text(remaining_minutes: i64) -> String {
    format!("账户已被锁定，请在 {remaining_minutes} 分钟后重试")
}
