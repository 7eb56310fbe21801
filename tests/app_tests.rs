// Integration tests for the application shell: tab routing, session mirroring, counters

use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use spojen::backend::{
    AuthService, Backend, BackendStatus, DocumentStore, EmulatorBackend, NewMessage, Services,
    TimestampField, MESSAGES_COLLECTION,
};
use spojen::config::{EmulatorConfig, RulesMode};
use spojen::panels::ToastKind;
use spojen::snippets::SnippetKey;
use spojen::ui::{App, Tab};

fn emulator(rules: RulesMode) -> Rc<EmulatorBackend> {
    let settings = EmulatorConfig {
        auth_enabled: true,
        rules,
    };
    Rc::new(EmulatorBackend::new("demo-project", settings).expect("valid project id"))
}

fn app_for(emulator: &Rc<EmulatorBackend>) -> App {
    App::new(Backend::Connected(Services::from_emulator(Rc::clone(
        emulator,
    ))))
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn post(emulator: &EmulatorBackend, text: &str) {
    emulator
        .insert(
            MESSAGES_COLLECTION,
            NewMessage {
                text: text.to_string(),
                author_email: "other@example.hr".to_string(),
                created_at: TimestampField::Server,
            },
        )
        .expect("insert allowed");
}

#[test]
fn test_tab_snippet_routing() {
    let backend = emulator(RulesMode::Open);
    let mut app = app_for(&backend);

    assert_eq!(app.tab(), Tab::Overview);
    assert_eq!(app.visible_snippet(), SnippetKey::Init);

    app.select_tab(Tab::Init);
    assert_eq!(app.visible_snippet(), SnippetKey::Init);

    app.select_tab(Tab::Auth);
    assert_eq!(app.visible_snippet(), SnippetKey::Login);

    // The initial fetch reports its own snippet after the entry snippet is stored
    app.select_tab(Tab::Crud);
    assert_eq!(app.visible_snippet(), SnippetKey::GetDocs);

    app.select_tab(Tab::Realtime);
    assert_eq!(app.visible_snippet(), SnippetKey::OnSnapshot);

    app.select_tab(Tab::Security);
    assert_eq!(app.visible_snippet(), SnippetKey::RulesSecure);
    app.choose_rules(SnippetKey::RulesInsecure);
    assert_eq!(app.visible_snippet(), SnippetKey::RulesInsecure);
}

#[test]
fn test_session_mirrored_from_auth_service() {
    let backend = emulator(RulesMode::SignedIn);
    let mut app = app_for(&backend);
    assert!(app.user().is_none());

    // A session change made anywhere is picked up on the next tick
    backend
        .create_account("ana@example.hr", "123456")
        .expect("account created");
    app.tick(Instant::now());
    assert_eq!(app.user().map(|u| u.email.as_str()), Some("ana@example.hr"));

    backend.sign_out().unwrap();
    app.tick(Instant::now());
    assert!(app.user().is_none());
}

#[test]
fn test_session_already_active_at_startup() {
    let backend = emulator(RulesMode::SignedIn);
    backend.create_account("ana@example.hr", "123456").unwrap();
    let app = app_for(&backend);
    assert_eq!(app.user().map(|u| u.email.as_str()), Some("ana@example.hr"));
}

#[test]
fn test_register_through_keyboard() {
    let backend = emulator(RulesMode::SignedIn);
    let mut app = app_for(&backend);

    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.tab(), Tab::Auth);
    press(&mut app, KeyCode::Enter);
    assert!(app.is_panel_focused());

    // Sign-in email, password, button, then the registration form
    for _ in 0..3 {
        press(&mut app, KeyCode::Down);
    }
    assert!(app.is_typing());
    type_text(&mut app, "quinn@example.hr");
    assert!(!app.should_quit());
    press(&mut app, KeyCode::Down);
    type_text(&mut app, "123456");
    press(&mut app, KeyCode::Enter);

    let panel = app.auth_panel().expect("auth panel mounted");
    assert!(panel.is_pending());
    assert_eq!(panel.register_email.value(), "quinn@example.hr");

    app.tick(Instant::now());
    assert_eq!(app.visible_snippet(), SnippetKey::Register);
    assert_eq!(app.user().map(|u| u.email.as_str()), Some("quinn@example.hr"));
    let toast = app.toast().expect("success toast");
    assert_eq!(toast.kind(), ToastKind::Success);

    // Leaving the field lets q quit again
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_crud_actions_run_through_ticks() {
    let backend = emulator(RulesMode::Open);
    let mut app = app_for(&backend);
    app.select_tab(Tab::Crud);

    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    assert!(app.messages_panel().unwrap().is_pending());

    // The write shows its snippet, then the re-fetch settles on the read snippet
    app.tick(Instant::now());
    assert_eq!(app.visible_snippet(), SnippetKey::GetDocs);
    assert_eq!(app.messages_panel().unwrap().items().len(), 1);

    // List: delete the selected message
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('d'));
    app.tick(Instant::now());
    assert_eq!(app.visible_snippet(), SnippetKey::GetDocs);
    assert!(app.messages_panel().unwrap().items().is_empty());
}

#[test]
fn test_snapshot_counter_and_teardown_on_tab_change() {
    let backend = emulator(RulesMode::Open);
    let mut app = app_for(&backend);

    app.select_tab(Tab::Realtime);
    assert_eq!(app.snapshot_events(), 1);
    assert_eq!(backend.live_query_count(), 1);

    post(&backend, "one");
    app.tick(Instant::now());
    assert_eq!(app.snapshot_events(), 2);
    assert_eq!(app.messages_panel().unwrap().items().len(), 1);

    app.select_tab(Tab::Overview);
    assert!(app.messages_panel().is_none());
    assert_eq!(backend.live_query_count(), 0);

    post(&backend, "two");
    app.tick(Instant::now());
    assert_eq!(app.snapshot_events(), 2);

    // The counter lives as long as the app
    app.select_tab(Tab::Realtime);
    assert_eq!(app.snapshot_events(), 3);
    assert_eq!(app.messages_panel().unwrap().items().len(), 2);
}

#[test]
fn test_shutdown_releases_subscriptions() {
    let backend = emulator(RulesMode::Open);
    {
        let mut app = app_for(&backend);
        app.select_tab(Tab::Realtime);
        assert_eq!(backend.auth_listener_count(), 1);
        assert_eq!(backend.live_query_count(), 1);
    }
    assert_eq!(backend.auth_listener_count(), 0);
    assert_eq!(backend.live_query_count(), 0);
}

#[test]
fn test_unconfigured_shell() {
    let mut app = App::new(Backend::Unconfigured {
        reason: "Missing backend configuration.".to_string(),
    });
    assert!(app.user().is_none());

    app.select_tab(Tab::Crud);
    let panel = app.messages_panel().expect("panel mounted with banner");
    assert!(panel.setup_banner().is_some());
    assert!(panel.items().is_empty());
    assert_eq!(app.visible_snippet(), SnippetKey::AddDoc);

    app.select_tab(Tab::Auth);
    assert!(app.auth_panel().unwrap().setup_banner().is_some());
    app.tick(Instant::now());

    let backend = Backend::Unconfigured {
        reason: String::new(),
    };
    assert_eq!(backend.status(), BackendStatus::Error);
}
