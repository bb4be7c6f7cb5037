//! Error types for shell-courier.

use thiserror::Error;

/// Failures inside the execution pipeline.
///
/// These never reach callers of the execute surface: every failure is
/// folded into a [`CommandResult`](crate::CommandResult), with the
/// spawn-failure sentinel reserved for a process that never started.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The process could not be spawned.
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting for process termination failed.
    #[error("failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),
}
