//! In-process key-value store with per-context event inboxes.
//!
//! `MemoryStore::new()` creates the first context over fresh data.
//! `open_context()` opens another context over the same data, the way a second
//! browser tab shares one origin's storage.

use super::{KeyValueStore, StorageEvent, StorageEventSource, StoreResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

type Inbox = Rc<RefCell<VecDeque<StorageEvent>>>;

#[derive(Default)]
struct SharedState {
    entries: BTreeMap<String, String>,
    inboxes: Vec<Weak<RefCell<VecDeque<StorageEvent>>>>,
}

impl SharedState {
    fn broadcast(&mut self, author: &Inbox, event: StorageEvent) {
        self.inboxes.retain(|inbox| inbox.strong_count() > 0);
        for inbox in &self.inboxes {
            let Some(inbox) = inbox.upgrade() else {
                continue;
            };
            if Rc::ptr_eq(&inbox, author) {
                continue;
            }
            inbox.borrow_mut().push_back(event.clone());
        }
    }
}

/// One context handle over shared in-memory data.
pub struct MemoryStore {
    shared: Rc<RefCell<SharedState>>,
    inbox: Inbox,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::attach(Rc::new(RefCell::new(SharedState::default())))
    }

    /// Opens a sibling context; its writes notify this one and vice versa.
    pub fn open_context(&self) -> Self {
        Self::attach(Rc::clone(&self.shared))
    }

    fn attach(shared: Rc<RefCell<SharedState>>) -> Self {
        let inbox: Inbox = Rc::new(RefCell::new(VecDeque::new()));
        shared.borrow_mut().inboxes.push(Rc::downgrade(&inbox));
        Self { shared, inbox }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.shared.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut shared = self.shared.borrow_mut();
        let old_value = shared.entries.insert(key.to_string(), value.to_string());
        if old_value.as_deref() == Some(value) {
            return Ok(());
        }
        shared.broadcast(
            &self.inbox,
            StorageEvent::new(key, old_value, Some(value.to_string())),
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut shared = self.shared.borrow_mut();
        if let Some(old_value) = shared.entries.remove(key) {
            shared.broadcast(&self.inbox, StorageEvent::new(key, Some(old_value), None));
        }
        Ok(())
    }
}

impl StorageEventSource for MemoryStore {
    fn poll_events(&self) -> StoreResult<Vec<StorageEvent>> {
        Ok(self.inbox.borrow_mut().drain(..).collect())
    }
}
