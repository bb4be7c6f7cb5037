//! Integration tests for the command runner.
//!
//! These tests spawn real processes and rely on `sh`, so they are
//! gated to Unix.

#![cfg(unix)]

use std::time::{Duration, Instant};

use shell_courier::{
    execute_simple, CommandResult, CommandRunner, ExecOptions, RemoteTarget, SshOptions,
};

fn quiet() -> ExecOptions {
    ExecOptions::default().log_output(false)
}

// ============================================================================
// Waiting execution
// ============================================================================

#[test]
fn test_multi_line_output_joined_with_newlines() {
    let runner = CommandRunner::new();
    let result = runner.execute_args(["sh", "-c", "echo a; echo b"], quiet());

    assert_eq!(result, CommandResult::new(0, "a\nb"));
}

#[test]
fn test_no_output_nonzero_exit() {
    let runner = CommandRunner::new();
    let result = runner.execute_args(["sh", "-c", "exit 3"], quiet());

    assert_eq!(result, CommandResult::new(3, ""));
}

#[test]
fn test_stderr_merged_into_output() {
    let runner = CommandRunner::new();
    let result = runner.execute_args(["sh", "-c", "echo out; echo err 1>&2"], quiet());

    assert!(result.success());
    let mut lines: Vec<_> = result.output_lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, vec!["err", "out"]);
}

#[test]
fn test_shell_line_through_interpreter() {
    let runner = CommandRunner::new();
    let result = runner.execute_line("echo hello | tr a-z A-Z", quiet());

    assert_eq!(result, CommandResult::new(0, "HELLO"));
}

#[test]
fn test_execute_simple() {
    let result = execute_simple("echo hello");
    assert!(result.success());
    assert_eq!(result.output, "hello");
}

#[test]
fn test_script_file_execution() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("probe.sh");
    std::fs::write(&script, "#!/bin/sh\necho from-script\nexit 7\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let runner = CommandRunner::new();
    let result = runner.execute_args([script.to_str().unwrap()], quiet());

    assert_eq!(result, CommandResult::new(7, "from-script"));
}

// ============================================================================
// Spawn failure
// ============================================================================

#[test]
fn test_missing_executable_yields_sentinel() {
    let runner = CommandRunner::new();
    let result = runner.execute_args(["no-such-executable-anywhere-4c1d"], quiet());

    assert_eq!(result, CommandResult::new(-1, "Null process"));
    assert!(result.is_spawn_failure());
}

// ============================================================================
// Non-waiting (first-line peek) execution
// ============================================================================

#[test]
fn test_peek_returns_first_line_without_waiting() {
    let runner = CommandRunner::new();
    let start = Instant::now();
    let result = runner.execute_args(
        ["sh", "-c", "echo first; sleep 10; echo never"],
        quiet().wait_for_process(false),
    );

    assert_eq!(result, CommandResult::new(0, "first"));
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "peek mode must not block on process termination"
    );
}

// ============================================================================
// Remote invocation building
// ============================================================================

#[test]
fn test_remote_runner_uses_its_ssh_options() {
    let runner = CommandRunner::with_ssh_options(SshOptions::new().strict_host_key_checking(true));
    assert!(runner.ssh_options().strict_host_key_checking);

    let wrapped = shell_courier::ssh_argv(
        &RemoteTarget::new("alice", "example.com"),
        runner.ssh_options(),
        ["ls", "-la"],
    );
    assert_eq!(
        wrapped,
        vec![
            "ssh",
            "-q",
            "alice@example.com",
            "-o",
            "StrictHostKeyChecking=yes ",
            "ls",
            "-la",
        ]
    );
}

#[test]
fn test_scp_invocation_text() {
    let line = shell_courier::scp_line(
        &RemoteTarget::new("bob", "h"),
        &SshOptions::default(),
        "/remote/f",
        "/local/f",
    );
    assert_eq!(line, "scp -o StrictHostKeyChecking=no bob@h:/remote/f /local/f");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_executions_are_isolated() {
    let runner = CommandRunner::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let runner = &runner;
                scope.spawn(move || {
                    let marker = format!("marker-{i}");
                    let echo = format!("echo {marker}");
                    let result = runner.execute_args(["sh", "-c", echo.as_str()], quiet());
                    (marker, result)
                })
            })
            .collect();

        for handle in handles {
            let (marker, result) = handle.join().unwrap();
            assert_eq!(result, CommandResult::new(0, marker));
        }
    });
}
