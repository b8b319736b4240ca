//! CLI end-to-end tests: spawn the `apicheck` binary and check exit codes
//! and output for `run`, `validate`, and `version`.

mod common;

use std::io::Write as _;
use std::process::Stdio;

use tokio::process::Command;

use common::TestServer;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG_ERROR: i32 = 2;
const EXIT_ASSERTION_FAILED: i32 = 6;

fn plan_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

async fn apicheck(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_apicheck"))
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .expect("failed to spawn apicheck")
}

#[tokio::test]
async fn version_prints_name_and_version() {
    let output = apicheck(&["version"]).await;
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("apicheck"));
}

#[tokio::test]
async fn version_json_output() {
    let output = apicheck(&["version", "--format", "json"]).await;
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("version output is JSON");
    assert_eq!(value["name"], "apicheck");
}

#[tokio::test]
async fn validate_accepts_valid_plan() {
    let file = plan_file(
        "url: http://localhost\ngroups: [{ name: g, routes: [{ name: a, method: GET, path: / }] }]",
    );
    let output = apicheck(&["validate", file.path().to_str().unwrap()]).await;
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok"));
}

#[tokio::test]
async fn validate_rejects_missing_url() {
    let file = plan_file("url: ''\ngroups: []");
    let output = apicheck(&["validate", file.path().to_str().unwrap()]).await;
    assert_eq!(output.status.code(), Some(EXIT_CONFIG_ERROR));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("url is missing"));
}

#[tokio::test]
async fn validate_json_reports_issues() {
    let file = plan_file("url: ''\ngroups: []");
    let output = apicheck(&[
        "validate",
        "--format",
        "json",
        file.path().to_str().unwrap(),
    ])
    .await;
    assert_eq!(output.status.code(), Some(EXIT_CONFIG_ERROR));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate output is JSON");
    assert_eq!(value["valid"], false);
    assert_eq!(value["issues"][0]["severity"], "error");
}

#[tokio::test]
async fn validate_strict_promotes_warnings() {
    let yaml = "url: http://localhost\ngroups: [{ name: g, routes: [] }]";

    let file = plan_file(yaml);
    let output = apicheck(&["validate", file.path().to_str().unwrap()]).await;
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let file = plan_file(yaml);
    let output = apicheck(&["validate", "--strict", file.path().to_str().unwrap()]).await;
    assert_eq!(output.status.code(), Some(EXIT_CONFIG_ERROR));
}

#[tokio::test]
async fn run_with_missing_plan_exits_config_error() {
    let output = apicheck(&["run", "--config", "/nonexistent/plan.yaml"]).await;
    assert_eq!(output.status.code(), Some(EXIT_CONFIG_ERROR));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file not found"));
}

#[tokio::test]
async fn run_passing_plan_exits_zero() {
    let server = TestServer::spawn().await;
    let file = plan_file(&format!(
        r"
url: {}
groups:
  - name: users
    prefix: /api
    routes:
      - name: list
        method: GET
        path: /users
        asserts:
          status: {{ code: 200 }}
",
        server.base_url
    ));

    let output = apicheck(&["run", "--config", file.path().to_str().unwrap()]).await;
    assert_eq!(
        output.status.code(),
        Some(EXIT_SUCCESS),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test]
async fn run_failing_assertion_exits_assertion_code() {
    let server = TestServer::spawn().await;
    let file = plan_file(&format!(
        r"
url: {}
groups:
  - name: users
    prefix: /api
    routes:
      - name: list
        method: GET
        path: /users
        asserts:
          status: {{ code: 418 }}
",
        server.base_url
    ));

    let output = apicheck(&["run", "--config", file.path().to_str().unwrap()]).await;
    assert_eq!(output.status.code(), Some(EXIT_ASSERTION_FAILED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("assertion failed"));
}

#[tokio::test]
async fn run_writes_request_log() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("requests.jsonl");

    let file = plan_file(&format!(
        r"
url: {}
groups:
  - name: users
    prefix: /api
    routes:
      - {{ name: list, method: GET, path: /users }}
",
        server.base_url
    ));

    let output = apicheck(&[
        "run",
        "--config",
        file.path().to_str().unwrap(),
        "--log",
        log_path.to_str().unwrap(),
    ])
    .await;
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.trim().lines().count(), 1);
}
