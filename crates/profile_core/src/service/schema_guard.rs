//! Start-up storage schema guard.
//!
//! # Responsibility
//! - Seed required keys with an empty sequence when absent.
//! - Repair `personalInfo` when an old build saved it as a sequence.
//!
//! # Invariants
//! - Running the guard twice leaves the store unchanged the second time.
//! - Existing values are never rewritten except the `personalInfo` repair.
//! - Malformed JSON is left in place for readers to treat as absent.

use crate::keys;
use crate::store::{KeyValueStore, StoreResult};
use log::{info, warn};

/// Keys that must exist after start-up.
pub const REQUIRED_KEYS: &[&str] = &[
    keys::EXPERIENCES,
    keys::PERSONAL_INFO,
    keys::SKILLS,
    keys::MESSAGES,
];

/// What one guard run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardReport {
    pub seeded_keys: Vec<&'static str>,
    pub personal_info_repaired: bool,
}

impl GuardReport {
    pub fn is_noop(&self) -> bool {
        self.seeded_keys.is_empty() && !self.personal_info_repaired
    }
}

/// Ensures baseline keys exist with valid default shapes.
pub fn ensure_schema(store: &dyn KeyValueStore) -> StoreResult<GuardReport> {
    let mut report = GuardReport::default();

    for key in REQUIRED_KEYS {
        if store.get(key)?.is_none() {
            store.set(key, "[]")?;
            report.seeded_keys.push(*key);
        }
    }

    if let Some(raw) = store.get(keys::PERSONAL_INFO)? {
        if let Ok(serde_json::Value::Array(_)) = serde_json::from_str(&raw) {
            warn!("event=schema_guard module=schema_guard status=repair key=personalInfo from=array to=object");
            store.set(keys::PERSONAL_INFO, "{}")?;
            report.personal_info_repaired = true;
        }
    }

    info!(
        "event=schema_guard module=schema_guard status=ok seeded={} repaired={}",
        report.seeded_keys.len(),
        report.personal_info_repaired
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, REQUIRED_KEYS};
    use crate::keys;
    use crate::store::{KeyValueStore, MemoryStore};

    #[test]
    fn seeds_every_missing_key_and_repairs_fresh_personal_info() {
        let store = MemoryStore::new();

        let report = ensure_schema(&store).unwrap();

        assert_eq!(report.seeded_keys, REQUIRED_KEYS.to_vec());
        // A freshly seeded `personalInfo` is `[]`, which the repair turns into `{}`.
        assert!(report.personal_info_repaired);
        assert_eq!(store.get(keys::PERSONAL_INFO).unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get(keys::SKILLS).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn second_run_is_noop() {
        let store = MemoryStore::new();
        ensure_schema(&store).unwrap();

        let report = ensure_schema(&store).unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn leaves_existing_and_malformed_values_alone() {
        let store = MemoryStore::new();
        store.set(keys::SKILLS, r#"[{"name":"Rust","level":90}]"#).unwrap();
        store.set(keys::MESSAGES, "{broken").unwrap();

        ensure_schema(&store).unwrap();

        assert_eq!(
            store.get(keys::SKILLS).unwrap().as_deref(),
            Some(r#"[{"name":"Rust","level":90}]"#)
        );
        assert_eq!(store.get(keys::MESSAGES).unwrap().as_deref(), Some("{broken"));
    }
}
