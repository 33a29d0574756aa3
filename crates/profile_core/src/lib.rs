//! Core logic for a personal profile page backed by local key-value storage.
//!
//! Projections read storage and render page regions; the access gate guards
//! the admin entry with a persisted lockout.

pub mod app;
pub mod clock;
pub mod config;
pub mod date_format;
pub mod db;
pub mod gate;
pub mod keys;
pub mod listener;
pub mod logging;
pub mod markup;
pub mod model;
pub mod notice;
pub mod projection;
pub mod render;
pub mod service;
pub mod store;

pub use app::{ProfileApp, StartupReport};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, GateConfig, ProfileConfig};
pub use gate::{lock_status, AccessGate, GateContext, GateState, LockStatus, OpenOutcome, SubmitOutcome};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use projection::ProjectionKind;
pub use render::page::Page;
pub use service::contact_service::{ContactForm, ContactFormError};
pub use store::{
    KeyValueStore, MemoryStore, SqliteStore, StorageEvent, StorageEventSource, StoreError,
    StoreJsonExt, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
