//! Config, Answers and Results File Tests
//!
//! These tests verify:
//! - AppConfig save/load round trip and validation
//! - Partial config files fall back to defaults
//! - Answers files load from disk
//! - JsonResultsFile writes a snapshot that loads back

use quotewizard::config_file::{AppConfig, VerificationBackend, VerificationConfig};
use quotewizard::results::{JsonResultsFile, ResultsSink};
use quotewizard::verification::VerificationWorker;
use quotewizard::wizard_state::WizardController;
use quotewizard::Answers;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quotewizard.json");
    let config = AppConfig {
        country_code: "+44".into(),
        code_length: 4,
        verification: VerificationConfig {
            backend: VerificationBackend::Offline,
            demo_code: "2468".into(),
        },
        results_path: Some(dir.path().join("quote.json")),
    };

    config.save_to_file(&path).unwrap();
    let loaded = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "verification": { "backend": "offline" } }"#).unwrap();

    let config = AppConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.country_code, "+91");
    assert_eq!(config.code_length, 6);
    assert_eq!(config.verification.backend, VerificationBackend::Offline);
    assert_eq!(config.verification.demo_code, "123456");
}

#[test]
fn test_load_or_default_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "code_length": 6, "verification": { "demo_code": "1234" } }"#).unwrap();

    let err = AppConfig::load_or_default(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Demo code must be 6 digits"));
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = AppConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse configuration JSON"));
}

#[test]
fn test_missing_config_file_names_the_path() {
    let err = AppConfig::load_from_file("/nonexistent/quotewizard.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration"));
}

#[test]
fn test_answers_file_to_results_file() {
    let dir = TempDir::new().unwrap();
    let answers_path = dir.path().join("answers.json");
    fs::write(
        &answers_path,
        r#"{
            "configuration": "2 BHK - Large",
            "package": "basic",
            "contact": {
                "name": "Meera",
                "email": "meera@example.com",
                "mobile": "8123456789",
                "address": "Lake View Towers",
                "whatsapp_opt_in": false
            },
            "code": "123456"
        }"#,
    )
    .unwrap();

    let config = AppConfig::default();
    let (delivery, confirmation) = config.capabilities();
    let worker = VerificationWorker::new(delivery, confirmation);
    let answers = Answers::load_from_file(&answers_path).unwrap();
    let mut wizard = WizardController::new();
    let snapshot = answers.run(&mut wizard, &worker).unwrap();

    let sink = JsonResultsFile::new(dir.path().join("quote.json"));
    sink.deliver(&snapshot).unwrap();
    assert_eq!(sink.load().unwrap(), snapshot);

    let raw = fs::read_to_string(sink.path()).unwrap();
    assert!(raw.contains("\"2 BHK - Large\""));
    assert!(raw.contains("\"whatsapp_opt_in\": false"));
}
