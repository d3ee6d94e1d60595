//! CLI tests that run the built binary.
//!
//! These never reach a real API: they cover argument handling and the
//! failures that happen before any request is sent.

use std::process::{Command, Output};

const ENV_VARS: &[&str] = &[
    "ITAU_CLIENT_ID",
    "ITAU_CLIENT_SECRET",
    "ITAU_CERTIFICATE",
    "ITAU_CERTIFICATE_KEY",
    "ITAU_API_URL",
    "ITAU_AUTH_URL",
    "ITAU_SESSION_KEY",
    "ITAU_CORRELATION_ID",
];

/// Run the CLI binary with arguments and a clean `ITAU_*` environment.
fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_itau"));
    cmd.args(args);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect failure, returning stderr.
fn run_cli_failure(args: &[&str]) -> String {
    let output = run_cli(args);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

const CONNECTION: &[&str] = &[
    "--client-id",
    "client",
    "--client-secret",
    "secret",
    "--certificate",
    "/nonexistent/itau.crt",
    "--certificate-key",
    "/nonexistent/itau.key",
    "--api-url",
    "https://api.test/pix/v2",
    "--auth-url",
    "https://auth.test/api/oauth/token",
];

#[test]
fn test_help_lists_subcommands() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("token"));
    assert!(stdout.contains("request"));
}

#[test]
fn test_token_requires_credentials() {
    let stderr = run_cli_failure(&["token"]);
    assert!(stderr.contains("--client-id"));
}

#[test]
fn test_token_reports_missing_certificate() {
    let mut args = vec!["token"];
    args.extend_from_slice(CONNECTION);

    let stderr = run_cli_failure(&args);
    assert!(stderr.contains("invalid certificate"), "stderr: {stderr}");
    assert!(stderr.contains("/nonexistent/itau.crt"), "stderr: {stderr}");
}

#[test]
fn test_request_rejects_unknown_method() {
    let mut args = vec!["request", "PATCH", "/cob"];
    args.extend_from_slice(CONNECTION);

    let stderr = run_cli_failure(&args);
    assert!(stderr.contains("unsupported HTTP method"), "stderr: {stderr}");
}

#[test]
fn test_request_rejects_plain_http_api_url() {
    let args = [
        "request",
        "GET",
        "/cob",
        "--client-id",
        "client",
        "--client-secret",
        "secret",
        "--certificate",
        "/nonexistent/itau.crt",
        "--certificate-key",
        "/nonexistent/itau.key",
        "--api-url",
        "http://api.test/pix/v2",
        "--auth-url",
        "https://auth.test/api/oauth/token",
    ];

    let stderr = run_cli_failure(&args);
    assert!(stderr.contains("must use HTTPS"), "stderr: {stderr}");
}
