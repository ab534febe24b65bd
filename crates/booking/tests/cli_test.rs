//! Integration tests for the `booking` CLI binary.
//!
//! Argument parsing, help output, completions and configuration run
//! without any server; command tests run against a wiremock API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `booking` binary with env isolation.
///
/// Clears all `BOOKING_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn booking_cmd_in(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("booking");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BOOKING_PROFILE")
        .env_remove("BOOKING_BASE_URL")
        .env_remove("BOOKING_OUTPUT")
        .env_remove("BOOKING_INSECURE")
        .env_remove("BOOKING_TIMEOUT");
    cmd
}

fn booking_cmd() -> assert_cmd::Command {
    booking_cmd_in(std::path::Path::new("/tmp/booking-cli-test-nonexistent"))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

async fn mount_get(server: &MockServer, collection: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{collection}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_directory(server: &MockServer) {
    mount_get(
        server,
        "practitioners",
        json!([
            { "id": 10, "firstName": "Alice", "lastName": "Martin", "speciality": "Cardiology" },
            { "id": "11", "firstName": "Bob", "speciality": "Dermatology" }
        ]),
    )
    .await;
    mount_get(server, "patients", json!([{ "id": 5, "firstName": "Paul" }])).await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = booking_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    booking_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("practitioners")
            .and(predicate::str::contains("availabilities"))
            .and(predicate::str::contains("appointments"))
            .and(predicate::str::contains("book")),
    );
}

#[test]
fn test_version_flag() {
    booking_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("booking"));
}

#[test]
fn test_completions_zsh() {
    booking_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = booking_cmd()
        .args(["--output", "yaml", "practitioners"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    booking_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_init_then_profiles() {
    let home = tempfile::tempdir().unwrap();

    booking_cmd_in(home.path())
        .args(["config", "init", "--name", "local", "--url", "http://127.0.0.1:3000/api"])
        .assert()
        .success();

    booking_cmd_in(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local *"));

    booking_cmd_in(home.path())
        .args(["config", "init", "--name", "local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_unknown_profile() {
    booking_cmd()
        .args(["--profile", "prod", "practitioners"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("prod"));
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_practitioners_json() {
    let server = MockServer::start().await;
    mount_directory(&server).await;

    let output = booking_cmd()
        .args(["--base-url", &api_url(&server), "-o", "json-compact", "practitioners"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["firstName"], "Alice");
    assert_eq!(value[1]["id"], 11);
}

#[tokio::test]
async fn test_availabilities_are_scoped_and_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/availabilities"))
        .and(query_param("practitionerId", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "practitionerId": 10, "startDate": "2024-06-15T14:00:00Z", "endDate": "2024-06-15T14:30:00Z" },
            { "id": 1, "practitionerId": 10, "startDate": "2024-06-15T09:00:00Z", "endDate": "2024-06-15T09:30:00Z" }
        ])))
        .mount(&server)
        .await;

    booking_cmd()
        .args(["--base-url", &api_url(&server), "-o", "plain", "availabilities", "-P", "10"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[tokio::test]
async fn test_appointments_table_joins_practitioners() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_get(
        &server,
        "appointments",
        json!([
            { "id": 1, "practitionerId": 10, "patientId": 5, "startDate": "2024-06-15T10:30:00Z", "endDate": "2024-06-15T11:00:00Z" },
            { "id": 2, "practitionerId": 99, "patientId": 5, "startDate": "2024-06-16T08:00:00Z", "endDate": "2024-06-16T08:30:00Z" }
        ]),
    )
    .await;

    booking_cmd()
        .args(["--base-url", &api_url(&server), "appointments"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Alice Martin")
                .and(predicate::str::contains("Cardiology"))
                .and(predicate::str::contains("15 Jun 2024, 10:30 – 11:00"))
                .and(predicate::str::contains("Paul")),
        );
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn test_unreachable_api() {
    booking_cmd()
        .args(["--base-url", "http://127.0.0.1:1/api", "--timeout", "5", "patients"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach"));
}

#[tokio::test]
async fn test_remote_failure_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/patients"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db offline" })))
        .mount(&server)
        .await;

    booking_cmd()
        .args(["--base-url", &api_url(&server), "patients"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("db offline"));
}

// ── Booking ─────────────────────────────────────────────────────────

#[test]
fn test_book_requires_all_fields() {
    booking_cmd()
        .args(["--base-url", "http://127.0.0.1:1/api", "book", "--patient", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("practitioner"));
}

async fn mount_slots(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/availabilities"))
        .and(query_param("practitionerId", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "practitionerId": 10, "startDate": "2024-06-15T09:00:00Z", "endDate": "2024-06-15T09:30:00Z" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_book_rejects_unknown_patient() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_slots(&server).await;

    booking_cmd()
        .args([
            "--base-url",
            &api_url(&server),
            "book",
            "--patient",
            "9",
            "--practitioner",
            "10",
            "--start",
            "2024-06-15T09:00:00Z",
            "--end",
            "2024-06-15T09:30:00Z",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("patient '9' not found"));
}

#[tokio::test]
async fn test_book_rejects_unavailable_slot() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_slots(&server).await;

    booking_cmd()
        .args([
            "--base-url",
            &api_url(&server),
            "book",
            "--patient",
            "5",
            "--practitioner",
            "10",
            "--start",
            "2024-06-15T12:00:00Z",
            "--end",
            "2024-06-15T12:30:00Z",
        ])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("No availability"));
}

#[tokio::test]
async fn test_book_posts_and_lists_new_appointment() {
    let server = MockServer::start().await;
    mount_directory(&server).await;
    mount_slots(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .and(body_json(json!({
            "practitionerId": 10,
            "patientId": 5,
            "startDate": "2024-06-15T09:00:00Z",
            "endDate": "2024-06-15T09:30:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        "appointments",
        json!([
            { "id": 42, "practitionerId": 10, "patientId": 5, "startDate": "2024-06-15T09:00:00Z", "endDate": "2024-06-15T09:30:00Z" }
        ]),
    )
    .await;

    booking_cmd()
        .args([
            "--base-url",
            &api_url(&server),
            "-o",
            "plain",
            "book",
            "--patient",
            "5",
            "--practitioner",
            "10",
            "--start",
            "2024-06-15T09:00:00Z",
            "--end",
            "2024-06-15T09:30:00Z",
        ])
        .assert()
        .success()
        .stdout("42\n")
        .stderr(predicate::str::contains("Appointment booked"));
}
