//! Common utilities for CLI E2E tests.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Invoke the CLI with `home` as HOME, feed `stdin`, and return the output.
pub fn run_cli(home: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    run_cli_with_env(home, args, stdin, &[])
}

/// Like [`run_cli`], with extra environment variables set.
pub fn run_cli_with_env(
    home: &Path,
    args: &[&str],
    stdin: &str,
    envs: &[(&str, &str)],
) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_clockburn"))
        .args(args)
        .env("HOME", home)
        .env_remove("CLOCKBURN_ENV")
        .env_remove("CLOCKBURN_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke the CLI and expect success.
pub fn run_cli_success(home: &Path, args: &[&str], stdin: &str) -> String {
    let (stdout, stderr, code) = run_cli(home, args, stdin);
    if code != 0 && !stderr.is_empty() {
        eprintln!("CLI error output: {}", stderr);
    }
    assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
    stdout
}

/// Invoke the CLI and expect failure.
pub fn run_cli_failure(home: &Path, args: &[&str]) -> (String, String, i32) {
    let (stdout, stderr, code) = run_cli(home, args, "");
    assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
    (stdout, stderr, code)
}

/// Parse the JSON document that starts at the first line beginning with `{`.
pub fn trailing_json(stdout: &str) -> serde_json::Value {
    let start = stdout
        .lines()
        .scan(0, |offset, line| {
            let at = *offset;
            *offset += line.len() + 1;
            Some((at, line))
        })
        .find(|(_, line)| line.starts_with('{'))
        .map(|(at, _)| at)
        .expect("no JSON object in output");
    serde_json::from_str(&stdout[start..]).expect("Failed to parse JSON output")
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack,
        needle
    );
}
