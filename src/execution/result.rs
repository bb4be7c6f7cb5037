//! Execution result type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exit code reported when no process could be started.
///
/// This is distinct from a process that started and exited non-zero:
/// `-1` means the executable was never spawned at all.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

/// Output text reported when no process could be started.
pub const SPAWN_FAILURE_OUTPUT: &str = "Null process";

/// Result of a command execution: the process exit code and its
/// captured combined output.
///
/// Constructed once at the end of an execution and never mutated.
/// Two results compare equal exactly when both fields are equal, and
/// the `Display` form is the raw output text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandResult {
    /// Process exit status. `0` means success.
    pub exit_code: i32,
    /// Captured output text, stdout and stderr combined.
    pub output: String,
}

impl CommandResult {
    /// Create a new result.
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    /// The sentinel result for a process that could not be spawned.
    pub fn spawn_failure() -> Self {
        Self::new(SPAWN_FAILURE_EXIT_CODE, SPAWN_FAILURE_OUTPUT)
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if this is the spawn-failure sentinel.
    pub fn is_spawn_failure(&self) -> bool {
        self.exit_code == SPAWN_FAILURE_EXIT_CODE && self.output == SPAWN_FAILURE_OUTPUT
    }

    /// Consume the result, returning the captured output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Get output lines.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output)
    }
}
