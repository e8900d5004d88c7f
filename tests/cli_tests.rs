// tests/cli_tests.rs
use health_probe::HealthReport;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_health-probe"));
    for (key, _) in std::env::vars() {
        if key.starts_with("HEALTH_PROBE_") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG");
    cmd.args(args).output().expect("Failed to run health-probe")
}

#[test]
fn test_healthy_service_exits_zero_and_prints_report() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"healthy"}"#)
        .create();

    let output = run_cli(&["--base-url", &server.url(), "--json"]);

    mock.assert();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: HealthReport = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report.status, "healthy");
    assert_eq!(report.status_code, 200);
    assert!(report.url.ends_with("/health"));
}

#[test]
fn test_unavailable_service_exits_non_zero() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/health")
        .with_status(503)
        .with_body(r#"{"status":"unhealthy"}"#)
        .create();

    let output = run_cli(&["--base-url", &server.url(), "--json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    // Reported once by the log line, not repeated by an `Error:` trailer
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("expected 200, got 503").count(), 1, "stderr: {}", stderr);
    assert!(!stderr.contains("Error: "));
}

#[test]
fn test_missing_config_file_exits_non_zero() {
    let output = run_cli(&["--config", "/nonexistent/health-probe.yaml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
