//! Integration tests for the `albkit` CLI binary.
//!
//! Argument parsing, offline commands, and a few controller round trips
//! against a wiremock controller.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `albkit` binary with env isolation.
///
/// Clears all `ALBKIT_*` env vars and points config lookups at a
/// nonexistent path so tests never touch the user's real configuration.
fn albkit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("albkit");
    cmd.env("HOME", "/tmp/albkit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/albkit-cli-test-nonexistent")
        .env("ALBKIT_CONFIG", "/tmp/albkit-cli-test-nonexistent/config.toml")
        .env_remove("ALBKIT_PROFILE")
        .env_remove("ALBKIT_CONTROLLER")
        .env_remove("ALBKIT_USERNAME")
        .env_remove("ALBKIT_PASSWORD")
        .env_remove("ALBKIT_TENANT")
        .env_remove("ALBKIT_OUTPUT")
        .env_remove("ALBKIT_INSECURE")
        .env_remove("ALBKIT_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// `albkit_cmd` pointed at a mock controller with env credentials.
fn controller_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = albkit_cmd();
    cmd.env("ALBKIT_USERNAME", "admin")
        .env("ALBKIT_PASSWORD", "s3cret")
        .args(["--controller", &server.uri()]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "csrftoken=csrf-abc; Path=/")
                .append_header("set-cookie", "sessionid=sess-123; Path=/; HttpOnly")
                .set_body_json(json!({"user": {"username": "admin"}})),
        )
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = albkit_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    albkit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Avi")
            .and(predicate::str::contains("kinds"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("delete")),
    );
}

#[test]
fn test_version_flag() {
    albkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("albkit"));
}

#[test]
fn test_get_needs_uuid_or_name() {
    let output = albkit_cmd().args(["get", "pool"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_bad_param_is_rejected() {
    let output = albkit_cmd()
        .args(["list", "pool", "--param", "novalue"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("KEY=VALUE"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    albkit_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Kinds ───────────────────────────────────────────────────────────

#[test]
fn test_kinds_table() {
    albkit_cmd().arg("kinds").assert().success().stdout(
        predicate::str::contains("VirtualService")
            .and(predicate::str::contains("api/virtualservice"))
            .and(predicate::str::contains("HealthMonitor")),
    );
}

#[test]
fn test_kinds_filter_plain() {
    let output = albkit_cmd()
        .args(["kinds", "vsvip", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let tokens: Vec<&str> = stdout.lines().collect();
    assert!(tokens.contains(&"vsvip"));
    assert!(tokens.iter().all(|t| t.contains("vsvip")));
}

#[test]
fn test_unknown_kind_is_usage_error() {
    let output = albkit_cmd()
        .args(["list", "nosuchkind", "--controller", "127.0.0.1:9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nosuchkind"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_env() {
    albkit_cmd()
        .args(["config", "path"])
        .env("ALBKIT_CONFIG", "/tmp/albkit-elsewhere.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/albkit-elsewhere.toml"));
}

#[test]
fn test_config_profiles_marks_active() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
default_profile = "lab"

[profiles.lab]
controller = "ctrl.lab"
username = "admin"
password = "hunter2"

[profiles.prod]
controller = "ctrl.prod"
"#
    )
    .unwrap();

    albkit_cmd()
        .args(["config", "profiles"])
        .env("ALBKIT_CONFIG", file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("* lab").and(predicate::str::contains("  prod")));

    albkit_cmd()
        .args(["config", "show"])
        .env("ALBKIT_CONFIG", file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("****").and(predicate::str::contains("hunter2").not()));
}

#[test]
fn test_missing_config_is_usage_error() {
    let output = albkit_cmd().args(["list", "pool"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No controller configured"));
}

#[test]
fn test_missing_credentials_is_auth_error() {
    let output = albkit_cmd()
        .args(["list", "pool", "--controller", "127.0.0.1:9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

// ── Controller round trips ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_pools_plain() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/pool"))
        .and(query_param("cloud_ref.name", "Default-Cloud"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [
                {"uuid": "pool-1", "name": "web"},
                {"uuid": "pool-2", "name": "api"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    controller_cmd(&server)
        .args(["list", "pool", "--cloud", "Default-Cloud", "-o", "plain"])
        .assert()
        .success()
        .stdout("pool-1\npool-2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_by_name_json() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/virtualservice"))
        .and(query_param("name", "web-vs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"uuid": "vs-1", "name": "web-vs"}]
        })))
        .mount(&server)
        .await;

    controller_cmd(&server)
        .args(["get", "VirtualService", "--name", "web-vs", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""uuid":"vs-1""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_missing_object_exits_not_found() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/pool/pool-404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Pool object not found!"})),
        )
        .mount(&server)
        .await;

    let output = controller_cmd(&server)
        .args(["get", "pool", "pool-404"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_requires_yes_without_terminal() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = controller_cmd(&server)
        .args(["delete", "pool", "pool-1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/pool/pool-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    controller_cmd(&server)
        .args(["delete", "pool", "pool-1", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted Pool pool-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_controller_version() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/initial-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"version": {"Version": "22.1.3"}})),
        )
        .mount(&server)
        .await;

    controller_cmd(&server)
        .arg("version")
        .assert()
        .success()
        .stdout("22.1.3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let output = controller_cmd(&server).arg("version").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Invalid credentials"));
}
