//! Command execution engine.
//!
//! This module provides local and SSH command execution:
//! - Argument-vector and shell-string invocation forms
//! - Combined stdout/stderr capture
//! - Waiting and first-line peek modes
//!
//! # Example
//!
//! ```no_run
//! use shell_courier::execution::{execute_simple, CommandRunner, ExecOptions, RemoteTarget};
//!
//! // Simple one-shot execution
//! let result = execute_simple("echo hello");
//! println!("Output: {}", result.output);
//!
//! // Remote execution over ssh
//! let runner = CommandRunner::new();
//! let target = RemoteTarget::new("alice", "example.com");
//! let result = runner.execute_remote_args(&target, ["uptime"], ExecOptions::default());
//! println!("Exit code: {}", result.exit_code);
//! ```

mod command;
mod executor;
mod result;

pub use command::{
    scp_line, ssh_argv, ssh_line, ExecOptions, Invocation, RemoteTarget, SshOptions,
};
pub use executor::{execute_simple, CommandRunner};
pub use result::{CommandResult, SPAWN_FAILURE_EXIT_CODE, SPAWN_FAILURE_OUTPUT};
