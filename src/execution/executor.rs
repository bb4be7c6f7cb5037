//! Command execution engine.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, error};

use super::command::{
    scp_line, ssh_argv, ssh_line, ExecOptions, Invocation, RemoteTarget, SshOptions,
};
use super::result::CommandResult;
use crate::error::RunnerError;

/// Executes commands locally or over SSH and captures a single
/// consolidated [`CommandResult`].
///
/// Every call owns its child process and pipes exclusively, so one
/// runner may be shared freely across threads. Failures never
/// propagate as errors: a process that cannot be spawned yields the
/// [`CommandResult::spawn_failure`] sentinel, and everything else ends
/// in a result carrying whatever exit code and output were observed.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    ssh: SshOptions,
}

impl CommandRunner {
    /// Create a runner with default SSH options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with explicit SSH options.
    pub fn with_ssh_options(ssh: SshOptions) -> Self {
        Self { ssh }
    }

    /// The SSH options applied to remote invocations.
    pub fn ssh_options(&self) -> &SshOptions {
        &self.ssh
    }

    /// Execute an invocation and capture its result.
    ///
    /// With `opts.wait_for_process` set, blocks until the process
    /// exits, draining stdout and stderr into one combined buffer.
    /// Otherwise reads at most the first output line and returns with
    /// exit code `0` without observing termination. No timeout is
    /// imposed: a child that never exits blocks the caller.
    pub fn execute(&self, invocation: &Invocation, opts: ExecOptions) -> CommandResult {
        let rendered = invocation.rendered();

        let mut child = match spawn(invocation) {
            Ok(child) => child,
            Err(e) => {
                error!(command = %rendered, error = %e, "error starting process");
                return CommandResult::spawn_failure();
            }
        };

        let (exit_code, output) = if opts.wait_for_process {
            drain_and_wait(&mut child, &rendered)
        } else {
            peek_first_line(&mut child)
        };

        log_command(opts.log_output, &rendered, &output, exit_code);
        CommandResult::new(exit_code, output)
    }

    /// Execute an argument vector, no shell interpretation.
    pub fn execute_args<I, S>(&self, args: I, opts: ExecOptions) -> CommandResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute(&Invocation::argv(args), opts)
    }

    /// Execute a command line through the platform shell.
    ///
    /// This form always waits for completion.
    pub fn execute_line(&self, line: &str, opts: ExecOptions) -> CommandResult {
        self.execute(&Invocation::shell(line), opts.wait_for_process(true))
    }

    /// Execute an argument vector on a remote host via `ssh`.
    pub fn execute_remote_args<I, S>(
        &self,
        target: &RemoteTarget,
        args: I,
        opts: ExecOptions,
    ) -> CommandResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute(&Invocation::Argv(ssh_argv(target, &self.ssh, args)), opts)
    }

    /// Execute a shell command line on a remote host via `ssh`.
    pub fn execute_remote_line(
        &self,
        target: &RemoteTarget,
        line: &str,
        opts: ExecOptions,
    ) -> CommandResult {
        self.execute_line(&ssh_line(target, &self.ssh, line), opts)
    }

    /// Copy a remote file to a local path via `scp`.
    pub fn copy_from_remote(&self, target: &RemoteTarget, from: &str, to: &str) -> CommandResult {
        self.execute_line(&scp_line(target, &self.ssh, from, to), ExecOptions::default())
    }
}

/// Simple one-shot shell command execution with default options.
pub fn execute_simple(line: &str) -> CommandResult {
    CommandRunner::new().execute_line(line, ExecOptions::default())
}

fn spawn(invocation: &Invocation) -> Result<Child, RunnerError> {
    invocation
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(RunnerError::Spawn)
}

/// Drain both output streams to end-of-stream, then wait for the exit
/// code. Lines from stdout and stderr are merged in arrival order.
fn drain_and_wait(child: &mut Child, rendered: &str) -> (i32, String) {
    let (tx, rx) = mpsc::channel::<String>();
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_line_reader(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_line_reader(stderr, tx.clone()));
    }
    drop(tx);

    let lines: Vec<String> = rx.into_iter().collect();
    for reader in readers {
        let _ = reader.join();
    }

    match wait_for_exit(child) {
        Ok(code) => (code, lines.join("\n")),
        Err(e) => {
            error!(command = %rendered, error = %e, "error waiting for process");
            let _ = child.kill();
            (0, lines.join("\n"))
        }
    }
}

fn wait_for_exit(child: &mut Child) -> Result<i32, RunnerError> {
    let status = child.wait().map_err(RunnerError::Wait)?;
    Ok(exit_code_of(status))
}

/// Read at most the first line of stdout, then release the child
/// without observing its exit code.
fn peek_first_line(child: &mut Child) -> (i32, String) {
    let mut line = String::new();
    if let Some(stdout) = child.stdout.take() {
        let _ = BufReader::new(stdout).read_line(&mut line);
    }
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
    reap(child);
    (0, line)
}

fn spawn_line_reader<R>(stream: R, tx: mpsc::Sender<String>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            // Read errors mean the stream is gone; stop quietly.
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    })
}

/// Best-effort termination. Kill and reap failures are ignored.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn exit_code_of(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .or_else(|| status.signal().map(|signal| 128 + signal))
            .unwrap_or(-1)
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}

/// One debug entry per command: the rendered command text, the output
/// when `log_output` allows it, and the exit value when non-zero.
fn log_command(log_output: bool, command: &str, output: &str, exit_code: i32) {
    let mut entry = command.to_string();
    if log_output && !output.is_empty() {
        entry.push_str("\n\t");
        entry.push_str(output);
    }
    if exit_code != 0 {
        entry.push_str("\n\tExit value = ");
        entry.push_str(&exit_code.to_string());
    }
    debug!("{entry}");
}
