//! Page-level orchestration.
//!
//! # Responsibility
//! - Run the schema guard once, then every projection, on start-up.
//! - Re-run projections for storage changes from other contexts.
//! - Route admin gate and contact form interactions, collecting toasts.
//!
//! # Invariants
//! - One projection's outcome never prevents another from rendering.
//! - All store reads are fresh; nothing is cached between renders.

use crate::clock::Clock;
use crate::config::ProfileConfig;
use crate::gate::{AccessGate, Feedback, GateContext, GateState, OpenOutcome, SubmitOutcome};
use crate::listener::projections_for;
use crate::model::message::Message;
use crate::notice::{Notice, NoticeBoard, NoticeKind};
use crate::projection::{self, ProjectionKind};
use crate::render::{self, page::Page};
use crate::service::contact_service::{self, ContactForm, ContactFormError, SUBMIT_SUCCESS_TEXT};
use crate::service::schema_guard::{ensure_schema, GuardReport};
use crate::store::{KeyValueStore, MemoryStore, StorageEvent, StorageEventSource, StoreResult};
use chrono::FixedOffset;
use log::{debug, error, info};

/// What `ProfileApp::start` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// `None` when the guard failed; rendering still ran.
    pub guard: Option<GuardReport>,
    pub rendered: Vec<ProjectionKind>,
}

/// One open profile page bound to a shared store.
pub struct ProfileApp<S, C> {
    store: S,
    session: MemoryStore,
    clock: C,
    config: ProfileConfig,
    display_offset: FixedOffset,
    page: Page,
    gate: AccessGate,
    notices: NoticeBoard,
}

impl<S, C> ProfileApp<S, C>
where
    S: KeyValueStore + StorageEventSource,
    C: Clock,
{
    pub fn new(store: S, clock: C, config: ProfileConfig, page: Page) -> Self {
        let display_offset = config.display_offset();
        let gate = AccessGate::new(config.gate());
        Self {
            store,
            session: MemoryStore::new(),
            clock,
            config,
            display_offset,
            page,
            gate,
            notices: NoticeBoard::new(),
        }
    }

    /// Runs the schema guard, then renders every projection.
    pub fn start(&mut self) -> StartupReport {
        let guard = match ensure_schema(&self.store) {
            Ok(report) => Some(report),
            Err(err) => {
                error!(
                    "event=app_start module=app status=error stage=schema_guard error={}",
                    err
                );
                None
            }
        };

        let rendered = ProjectionKind::ALL
            .into_iter()
            .inspect(|kind| self.run_projection(*kind))
            .collect();
        info!("event=app_start module=app status=ok");

        StartupReport { guard, rendered }
    }

    /// Re-reads storage and re-renders one projection.
    pub fn run_projection(&mut self, kind: ProjectionKind) {
        match kind {
            ProjectionKind::Photo => {
                let view = projection::photo::project(&self.store);
                render::apply_photos(&mut self.page, &view, &self.config.admin_entry_path);
            }
            ProjectionKind::Experience => {
                let view = projection::experience::project(&self.store);
                render::apply_experiences(&mut self.page, &view);
            }
            ProjectionKind::PersonalInfo => {
                let view = projection::personal_info::project(&self.store);
                render::apply_personal_info(&mut self.page, &view);
            }
            ProjectionKind::Skills => {
                let view = projection::skills::project(&self.store);
                render::apply_skills(&mut self.page, &view);
            }
            ProjectionKind::Messages => {
                let view = projection::messages::project(
                    &self.store,
                    self.clock.now_ms(),
                    &self.display_offset,
                );
                render::apply_messages(&mut self.page, &view);
            }
        }
        debug!(
            "event=projection_render module=app projection={} status=ok",
            kind.as_str()
        );
    }

    /// Handles one change notification; returns the projections re-run.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> Vec<ProjectionKind> {
        let kinds = projections_for(&event.key);
        debug!(
            "event=storage_change module=app key={} removed={} projections={}",
            event.key,
            event.new_value.is_none(),
            kinds.len()
        );
        for kind in kinds {
            self.run_projection(*kind);
        }
        kinds.to_vec()
    }

    /// Drains pending notifications from other contexts, in store order.
    pub fn pump_events(&mut self) -> StoreResult<Vec<ProjectionKind>> {
        let events = self.store.poll_events()?;
        let mut ran = Vec::new();
        for event in &events {
            ran.extend(self.handle_storage_event(event));
        }
        Ok(ran)
    }

    pub fn open_admin_gate(&mut self) -> OpenOutcome {
        let ctx = GateContext {
            store: &self.store,
            session: &self.session,
            clock: &self.clock,
        };
        let outcome = self.gate.open(&ctx);
        if let OpenOutcome::Locked { feedback, .. } = &outcome {
            push_toast(&mut self.notices, feedback);
        }
        outcome
    }

    pub fn submit_admin_password(&mut self, password: &str) -> StoreResult<SubmitOutcome> {
        let ctx = GateContext {
            store: &self.store,
            session: &self.session,
            clock: &self.clock,
        };
        let outcome = self.gate.submit(&ctx, password)?;
        match &outcome {
            SubmitOutcome::Locked { feedback, .. } | SubmitOutcome::LockedOut { feedback, .. } => {
                push_toast(&mut self.notices, feedback);
            }
            SubmitOutcome::Authenticated {
                warning: Some(warning),
                ..
            } => self.notices.push(warning.clone()),
            _ => {}
        }
        Ok(outcome)
    }

    pub fn cancel_admin_gate(&mut self) {
        self.gate.cancel();
    }

    /// Stores a visitor message and re-renders the list.
    ///
    /// Same-context writes produce no notification, so the re-render is explicit.
    pub fn submit_contact_form(&mut self, form: &ContactForm) -> Result<Message, ContactFormError> {
        let message = contact_service::submit_message(&self.store, &self.clock, form)?;
        let now_ms = self.clock.now_ms();
        self.notices.push(Notice::new(
            SUBMIT_SUCCESS_TEXT,
            NoticeKind::Success,
            now_ms,
            self.config.notice_duration_ms,
        ));
        self.run_projection(ProjectionKind::Messages);
        Ok(message)
    }

    /// Dismisses expired toasts.
    pub fn tick(&mut self) -> usize {
        self.notices.tick(self.clock.now_ms())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.active()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &MemoryStore {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn push_toast(notices: &mut NoticeBoard, feedback: &Feedback) {
    if let Feedback::Toast(notice) = feedback {
        notices.push(notice.clone());
    }
}
