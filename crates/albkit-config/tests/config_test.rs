#![allow(clippy::unwrap_used)]
// Loading and saving config files.

use std::io::Write;

use pretty_assertions::assert_eq;

use albkit_config::{Config, Profile, load_config_from, save_config_to};

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.default_profile.as_deref(), Some("default"));
    assert_eq!(config.defaults.output, "table");
    assert_eq!(config.defaults.timeout, 60);
    assert!(config.profiles.is_empty());
}

#[test]
fn test_profiles_parse() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
default_profile = "lab"

[defaults]
output = "json"
tenant = "shared"

[profiles.lab]
controller = "10.10.1.5"
username = "admin"
password_env = "LAB_PASSWORD"
tenant = "ops"
max_retries = 5

[profiles.prod]
controller = "https://avi.example.com"
username = "automation"
auth_token = "tok"
insecure = false
"#
    )
    .unwrap();

    let config = load_config_from(file.path()).unwrap();
    assert_eq!(config.default_profile.as_deref(), Some("lab"));
    assert_eq!(config.defaults.output, "json");
    assert_eq!(config.profile_names(), vec!["lab", "prod"]);

    let lab = config.profile("lab").unwrap();
    assert_eq!(lab.controller, "10.10.1.5");
    assert_eq!(lab.password_env.as_deref(), Some("LAB_PASSWORD"));
    assert_eq!(lab.max_retries, Some(5));

    let prod = config.profile("prod").unwrap();
    assert_eq!(prod.auth_token.as_deref(), Some("tok"));
    assert_eq!(prod.insecure, Some(false));

    assert!(config.profile("staging").is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[profiles.lab\ncontroller = ").unwrap();
    assert!(load_config_from(file.path()).is_err());
}

// ── Saving ──────────────────────────────────────────────────────────

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.profiles.insert(
        "lab".into(),
        Profile {
            controller: "ctrl.lab".into(),
            username: Some("admin".into()),
            tenant: Some("ops".into()),
            ..Profile::default()
        },
    );
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let lab = loaded.profile("lab").unwrap();
    assert_eq!(lab.controller, "ctrl.lab");
    assert_eq!(lab.tenant.as_deref(), Some("ops"));
}
