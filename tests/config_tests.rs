// Integration tests for configuration loading and backend bring-up

use std::io::Write;
use std::path::Path;

use spojen::backend::{Backend, BackendStatus};
use spojen::config::{Config, RulesMode, MISSING_CONFIG_MESSAGE};

#[test]
fn test_shipped_example_parses_but_is_incomplete() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("spojen.example.toml");
    let config = Config::from_file(&path).expect("example config parses");

    assert_eq!(config.firebase.project_id.as_deref(), Some("my-project"));
    assert_eq!(config.emulator.rules, RulesMode::SignedIn);
    assert_eq!(config.firebase.missing_required(), vec!["api_key", "app_id"]);

    let backend = Backend::connect(&config);
    assert_eq!(backend.status(), BackendStatus::Error);
    assert_eq!(backend.setup_reason(), Some(MISSING_CONFIG_MESSAGE));
}

#[test]
fn test_file_plus_environment_connects() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[firebase]\nproject_id = \"demo-project\"\napp_id = \"1:1:web:1\"\n\n[emulator]\nrules = \"open\""
    )
    .unwrap();

    let mut config = Config::from_file(file.path()).unwrap();
    config.apply_env(|key| match key {
        "FIREBASE_API_KEY" => Some("key".to_string()),
        _ => None,
    });

    let backend = Backend::connect(&config);
    assert_eq!(backend.status(), BackendStatus::Connected);
    assert_eq!(
        backend.services().map(|s| s.project_id.as_str()),
        Some("demo-project")
    );
}

#[test]
fn test_invalid_project_id_enters_setup_state() {
    let mut config = Config::default();
    config.apply_env(|key| match key {
        "FIREBASE_API_KEY" => Some("key".to_string()),
        "FIREBASE_PROJECT_ID" => Some("Not_A_Project".to_string()),
        "FIREBASE_APP_ID" => Some("1:1:web:1".to_string()),
        _ => None,
    });

    let backend = Backend::connect(&config);
    assert_eq!(backend.status(), BackendStatus::Error);
    assert!(backend
        .setup_reason()
        .is_some_and(|reason| reason.contains("Not_A_Project")));
}

#[test]
fn test_malformed_file_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[firebase\nproject_id = 1").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("TOML parse error"));
}
