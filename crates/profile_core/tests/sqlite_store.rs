use profile_core::{KeyValueStore, SqliteStore, StorageEvent, StorageEventSource};

fn two_contexts() -> (tempfile::TempDir, SqliteStore, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.db");
    let first = SqliteStore::open(&path).unwrap();
    let second = SqliteStore::open(&path).unwrap();
    (dir, first, second)
}

#[test]
fn writes_are_visible_to_other_contexts() {
    let (_dir, first, second) = two_contexts();

    first.set("skills", r#"[{"name":"Rust","level":90}]"#).unwrap();

    assert_eq!(
        second.get("skills").unwrap().as_deref(),
        Some(r#"[{"name":"Rust","level":90}]"#)
    );
}

#[test]
fn other_context_receives_events_but_author_does_not() {
    let (_dir, first, second) = two_contexts();

    first.set("skills", "[]").unwrap();
    first.set("skills", "[1]").unwrap();
    first.remove("skills").unwrap();

    assert!(first.poll_events().unwrap().is_empty());
    assert_eq!(
        second.poll_events().unwrap(),
        vec![
            StorageEvent::new("skills", None, Some("[]".to_string())),
            StorageEvent::new("skills", Some("[]".to_string()), Some("[1]".to_string())),
            StorageEvent::new("skills", Some("[1]".to_string()), None),
        ]
    );
    assert!(second.poll_events().unwrap().is_empty());
}

#[test]
fn unchanged_writes_and_missing_removes_are_silent() {
    let (_dir, first, second) = two_contexts();
    first.set("messages", "[]").unwrap();
    second.poll_events().unwrap();

    first.set("messages", "[]").unwrap();
    first.remove("absent").unwrap();

    assert!(second.poll_events().unwrap().is_empty());
}

#[test]
fn new_context_does_not_replay_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.db");
    let first = SqliteStore::open(&path).unwrap();
    first.set("experiences", "[]").unwrap();

    let late = SqliteStore::open(&path).unwrap();

    assert!(late.poll_events().unwrap().is_empty());
    assert_eq!(late.get("experiences").unwrap().as_deref(), Some("[]"));
}

#[test]
fn each_handle_has_its_own_origin() {
    let (_dir, first, second) = two_contexts();
    assert_ne!(first.origin(), second.origin());
}
