use profile_core::gate::Feedback;
use profile_core::render::templates::{EMPTY_EDUCATION_HTML, EMPTY_MESSAGES_HTML};
use profile_core::service::contact_service::SUBMIT_SUCCESS_TEXT;
use profile_core::{
    ContactForm, ContactFormError, GateState, KeyValueStore, ManualClock, MemoryStore,
    NoticeKind, OpenOutcome, Page, ProfileApp, ProfileConfig, ProjectionKind, StorageEvent,
    SubmitOutcome,
};

// 2024-05-10T14:05:00Z
const NOW: i64 = 1_715_349_900_000;

fn config() -> ProfileConfig {
    ProfileConfig {
        display_utc_offset_minutes: Some(0),
        ..ProfileConfig::default()
    }
}

fn started<'c>(store: &MemoryStore, clock: &'c ManualClock) -> ProfileApp<MemoryStore, &'c ManualClock> {
    let mut app = ProfileApp::new(store.open_context(), clock, config(), Page::standard());
    app.start();
    app
}

fn form(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn start_seeds_storage_and_renders_every_region() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = ProfileApp::new(store.open_context(), &clock, config(), Page::standard());

    let report = app.start();

    let guard = report.guard.expect("guard should succeed");
    assert_eq!(guard.seeded_keys.len(), 4);
    assert_eq!(report.rendered, ProjectionKind::ALL.to_vec());
    assert_eq!(store.get("personalInfo").unwrap().as_deref(), Some("{}"));

    let page = app.page();
    assert!(page.hero_photo.as_deref().unwrap().contains("placeholder-hero"));
    assert!(page.about_photo.as_deref().unwrap().contains("点击添加照片"));
    assert_eq!(page.education_timeline.as_deref(), Some(EMPTY_EDUCATION_HTML));
    assert!(page.skills_grid.as_deref().unwrap().contains("前端开发"));
    assert_eq!(page.hero_title.as_deref(), Some("我是开发者"));
    assert_eq!(
        page.contact_section.as_ref().unwrap().messages_display.as_deref(),
        Some(EMPTY_MESSAGES_HTML)
    );
}

#[test]
fn legacy_personal_info_array_is_repaired_on_start() {
    let store = MemoryStore::new();
    store.set("personalInfo", "[]").unwrap();
    let clock = ManualClock::new(NOW);
    let mut app = ProfileApp::new(store.open_context(), &clock, config(), Page::standard());

    let report = app.start();

    assert!(report.guard.unwrap().personal_info_repaired);
    assert_eq!(store.get("personalInfo").unwrap().as_deref(), Some("{}"));
}

#[test]
fn skills_change_from_another_context_reruns_only_skills() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);
    let before = app.page().clone();

    store
        .set("skills", r#"[{"name":"Rust","level":"90"}]"#)
        .unwrap();
    let ran = app.pump_events().unwrap();

    assert_eq!(ran, vec![ProjectionKind::Skills]);
    let grid = app.page().skills_grid.as_deref().unwrap();
    assert!(grid.contains("Rust"));
    assert!(grid.contains("熟练程度: 90%"));
    assert_eq!(app.page().education_timeline, before.education_timeline);
}

#[test]
fn personal_info_change_reruns_info_and_photos() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);

    store
        .set(
            "personalInfo",
            r#"{"name":"小明","bio":"<p>你好</p>","qq":"10001"}"#,
        )
        .unwrap();
    let ran = app.pump_events().unwrap();

    assert_eq!(
        ran,
        vec![ProjectionKind::PersonalInfo, ProjectionKind::Photo]
    );
    let page = app.page();
    assert_eq!(page.hero_title.as_deref(), Some("我是小明"));
    assert_eq!(page.hero_description.as_deref(), Some("你好"));
    let contacts = page.contact_info.as_ref().unwrap();
    assert_eq!(contacts.iter().filter(|item| item.label == "QQ").count(), 1);
}

#[test]
fn photo_change_renders_the_new_image() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);

    store.set("avatarPhoto", "data:image/png;base64,AAAA").unwrap();
    let ran = app.pump_events().unwrap();

    assert_eq!(ran, vec![ProjectionKind::Photo, ProjectionKind::PersonalInfo]);
    assert!(app
        .page()
        .hero_photo
        .as_deref()
        .unwrap()
        .contains(r#"src="data:image/png;base64,AAAA""#));
}

#[test]
fn unrelated_keys_trigger_nothing() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);
    let before = app.page().clone();

    let ran = app.handle_storage_event(&StorageEvent::new("theme", None, Some("dark".into())));

    assert!(ran.is_empty());
    assert_eq!(app.page(), &before);
}

#[test]
fn redelivered_messages_event_renders_the_same_list() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);
    store
        .set(
            "messages",
            r#"[
                {"id":"1","name":"甲","message":"早","date":"2024-05-10T13:05:00Z","status":"visible"},
                {"id":"2","name":"乙","message":"藏","date":"2024-05-10T13:06:00Z","status":"hidden"}
            ]"#,
        )
        .unwrap();
    let event = StorageEvent::new("messages", None, store.get("messages").unwrap());

    app.handle_storage_event(&event);
    let first = app.page().clone();
    app.handle_storage_event(&event);

    assert_eq!(app.page(), &first);
    let html = first
        .contact_section
        .as_ref()
        .unwrap()
        .messages_display
        .clone()
        .unwrap();
    assert!(html.contains("甲"));
    assert!(html.contains("今天 13:05"));
    assert!(!html.contains("乙"));
}

#[test]
fn contact_form_success_appends_renders_and_toasts() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);

    let message = app
        .submit_contact_form(&form(" 访客 ", "guest@example.com", "你好"))
        .unwrap();

    assert_eq!(message.name, "访客");
    let stored = store.get("messages").unwrap().unwrap();
    assert!(stored.contains("guest@example.com"));
    let html = app
        .page()
        .contact_section
        .as_ref()
        .unwrap()
        .messages_display
        .clone()
        .unwrap();
    assert!(html.contains("访客"));
    assert!(html.contains("今天 14:05"));
    assert_eq!(app.notices().len(), 1);
    assert_eq!(app.notices()[0].text, SUBMIT_SUCCESS_TEXT);
    assert_eq!(app.notices()[0].kind, NoticeKind::Success);

    clock.advance_ms(3_000);
    assert_eq!(app.tick(), 1);
    assert!(app.notices().is_empty());
}

#[test]
fn invalid_contact_form_writes_nothing() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);

    let err = app
        .submit_contact_form(&form("访客", "not-an-email", "你好"))
        .unwrap_err();

    assert!(matches!(err, ContactFormError::InvalidEmail));
    assert_eq!(store.get("messages").unwrap().as_deref(), Some("[]"));
    assert!(app.notices().is_empty());
}

#[test]
fn default_secret_login_warns_and_records_session_time() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut app = started(&store, &clock);

    assert_eq!(app.open_admin_gate(), OpenOutcome::PromptShown);
    let outcome = app.submit_admin_password("lxd123").unwrap();

    let SubmitOutcome::Authenticated { redirect, .. } = outcome else {
        panic!("expected authentication");
    };
    assert_eq!(redirect, "admin/index.html");
    assert_eq!(app.gate_state(), GateState::Idle);
    assert_eq!(app.notices()[0].kind, NoticeKind::Warning);
    assert_eq!(
        app.session().get("adminLoginTime").unwrap(),
        Some(NOW.to_string())
    );
    assert_eq!(store.get("adminLoginTime").unwrap(), None);
}

#[test]
fn lockout_is_shared_between_contexts_and_expires() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let mut first = started(&store, &clock);
    let mut second = started(&store, &clock);

    first.open_admin_gate();
    for _ in 0..2 {
        let outcome = first.submit_admin_password("wrong").unwrap();
        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    }
    let outcome = first.submit_admin_password("wrong").unwrap();
    assert!(matches!(outcome, SubmitOutcome::LockedOut { .. }));
    assert_eq!(first.notices()[0].text, "连续3次密码错误，账户已锁定5分钟");

    let OpenOutcome::Locked {
        remaining_minutes,
        feedback,
    } = second.open_admin_gate()
    else {
        panic!("second context should see the lock");
    };
    assert_eq!(remaining_minutes, 5);
    assert!(matches!(feedback, Feedback::Toast(_)));
    assert_eq!(second.notices().len(), 1);

    clock.advance_ms(5 * 60 * 1000);
    assert_eq!(second.open_admin_gate(), OpenOutcome::PromptShown);
    assert_eq!(store.get("loginLockData").unwrap(), None);
    assert_eq!(store.get("loginAttempts").unwrap(), None);
}
