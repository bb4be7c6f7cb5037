//! # shell-courier
//!
//! Lightweight local and SSH command execution with combined output
//! capture.
//!
//! This crate runs external commands, locally or on a remote host via
//! the system `ssh`/`scp` binaries, and wraps the exit code and the
//! merged stdout/stderr text in a single [`CommandResult`] value. The
//! execute surface is infallible: failures are reported through the
//! result, with exit code `-1` reserved for a process that could not
//! be started at all.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shell_courier::{CommandRunner, ExecOptions};
//!
//! // Initialize logging
//! shell_courier::logging::try_init().ok();
//!
//! let runner = CommandRunner::new();
//! let result = runner.execute_args(["ls", "-la"], ExecOptions::default());
//!
//! if result.success() {
//!     println!("{}", result.output);
//! } else {
//!     eprintln!("exit code {}", result.exit_code);
//! }
//! ```
//!
//! ## Remote execution
//!
//! Remote invocations shell out to `ssh`, with host key verification
//! disabled by default to match the historical behavior of this
//! runner; see [`SshOptions`] to opt back in.

pub mod error;
pub mod execution;
pub mod logging;

// Re-export commonly used types
pub use error::RunnerError;
pub use execution::{
    execute_simple, scp_line, ssh_argv, ssh_line, CommandResult, CommandRunner, ExecOptions,
    Invocation, RemoteTarget, SshOptions, SPAWN_FAILURE_EXIT_CODE, SPAWN_FAILURE_OUTPUT,
};
