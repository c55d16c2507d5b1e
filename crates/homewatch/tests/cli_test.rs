//! Integration tests for the `homewatch` CLI binary.
//!
//! Parsing, help, completions and config handling run without a server;
//! the rest talk to a wiremock stand-in.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `homewatch` binary with env isolation.
///
/// Clears all `HOMEWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn homewatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("homewatch");
    cmd.env("HOME", "/tmp/homewatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/homewatch-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("HOMEWATCH_URL")
        .env_remove("HOMEWATCH_OUTPUT")
        .env_remove("HOMEWATCH_INSECURE")
        .env_remove("HOMEWATCH_TIMEOUT")
        .env_remove("HOMEWATCH_PIN")
        .env_remove("HOMEWATCH_BACKEND__URL")
        .env_remove("HOMEWATCH_PANELS__ENTRY_ENABLED");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        homewatch_cmd()
            .arg("--url")
            .arg(uri)
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = homewatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    homewatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("monitoring server")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("deactivate"))
            .and(predicate::str::contains("buzzer")),
    );
}

#[test]
fn test_version_flag() {
    homewatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("homewatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    homewatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    homewatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    homewatch_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = homewatch_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_color_lists_palette() {
    let output = homewatch_cmd().args(["color", "magenta"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("lightblue"), "Expected palette in output:\n{text}");
}

#[test]
fn test_status_unreachable_server() {
    homewatch_cmd()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "status"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // A missing file is fine: the defaults are shown.
    homewatch_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[backend]")
                .and(predicate::str::contains("http://localhost:5001"))
                .and(predicate::str::contains("entry_enabled = false")),
        );
}

#[test]
fn test_config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    homewatch_cmd()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["--url", "http://hub.local:5001", "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    homewatch_cmd()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://hub.local:5001"));

    homewatch_cmd()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_renders_alarm_panel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarm/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "alarm_state": true, "people_count": 3 })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["status"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ALARM"), "{stdout}");
    assert!(stdout.contains("People inside"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_events_empty_feed_shows_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alarm/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let output = run_against(&server, &["events"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No data."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/PI2/state"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "kitchen_temp": 21.46 })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "node", "kitchen"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["panel"], "kitchen");
    let temp = value["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["field"] == "kitchen_temp")
        .unwrap();
    assert_eq!(temp["text"], "21.5 °C");
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_arm_success_prints_feedback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/alarm/arm"))
        .and(body_json(json!({ "pin": "1234", "armed": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/alarm/state"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "alarm_state": false, "people_count": 0 })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["arm", "--pin", " 1234 "]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("System armed."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deactivate_rejection_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/alarm/deactivate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "PIN locked out" })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["deactivate", "--pin", "0000"]).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("PIN locked out"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_pin_never_reaches_server() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["disarm", "--pin", "  "]).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Enter PIN."));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timer_config_rejects_non_numeric_input() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["timer-config", "ninety", "5"]).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Enter valid numeric values."));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buzzer_beep_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/actuator/buzzer"))
        .and(body_json(json!({ "action": "beep", "times": 1, "duration": 0.2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["buzzer", "beep"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buzzer_zero_duration_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/actuator/buzzer"))
        .and(body_json(json!({ "action": "on", "times": 3, "duration": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["buzzer", "on", "--times", "3", "--duration", "0"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_light_transport_failure_exits_with_connection_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/actuator/light"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = run_against(&server, &["light", "on"]).await;
    assert_eq!(output.status.code(), Some(7));
}
