//! Command building and representation.

use std::fmt;
use std::process::Command;

/// How a command reaches the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// An argument vector, executed directly without shell
    /// interpretation. The first element is the executable.
    Argv(Vec<String>),
    /// A single command line handed to the platform command
    /// interpreter (`sh -c` on Unix, `cmd /C` on Windows).
    Shell(String),
}

impl Invocation {
    /// Create an argument-vector invocation.
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv(args.into_iter().map(Into::into).collect())
    }

    /// Create a shell-string invocation.
    pub fn shell(line: impl Into<String>) -> Self {
        Self::Shell(line.into())
    }

    /// Human-readable rendering of the command, used for logging:
    /// arguments joined by single spaces.
    pub fn rendered(&self) -> String {
        match self {
            Self::Argv(args) => args.join(" "),
            Self::Shell(line) => line.clone(),
        }
    }

    /// Build the `std::process::Command` for this invocation.
    pub(crate) fn to_command(&self) -> Command {
        match self {
            Self::Argv(args) => {
                let mut parts = args.iter();
                let mut cmd = Command::new(parts.next().map(String::as_str).unwrap_or_default());
                cmd.args(parts);
                cmd
            }
            Self::Shell(line) => {
                #[cfg(unix)]
                {
                    let mut cmd = Command::new("sh");
                    cmd.arg("-c").arg(line);
                    cmd
                }
                #[cfg(not(unix))]
                {
                    let mut cmd = Command::new("cmd");
                    cmd.arg("/C").arg(line);
                    cmd
                }
            }
        }
    }
}

/// An SSH destination: `user@host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Remote username.
    pub user: String,
    /// Remote host address.
    pub host: String,
}

impl RemoteTarget {
    /// Create a new remote target.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// Options applied to `ssh`/`scp` invocations.
///
/// `strict_host_key_checking` defaults to `false`: unknown host keys
/// are accepted without prompting, matching the historical behavior of
/// this runner. That default trades security for non-interactive
/// operation; opt into `true` when the remote host key is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    /// Whether the SSH client verifies the remote host key.
    pub strict_host_key_checking: bool,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            strict_host_key_checking: false,
        }
    }
}

impl SshOptions {
    /// Create options with the default (disabled) host key checking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host key verification.
    pub fn strict_host_key_checking(mut self, strict: bool) -> Self {
        self.strict_host_key_checking = strict;
        self
    }

    fn host_key_value(&self) -> &'static str {
        if self.strict_host_key_checking {
            "yes"
        } else {
            "no"
        }
    }
}

/// Per-call execution options, replacing an overload family with a
/// single defaulted structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// Whether captured output is included in the diagnostic log entry.
    pub log_output: bool,
    /// Whether to drain all output and block until the process exits.
    /// When `false`, at most the first output line is read and the exit
    /// code is reported as `0` without waiting for termination.
    pub wait_for_process: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            log_output: true,
            wait_for_process: true,
        }
    }
}

impl ExecOptions {
    /// Create options with the defaults (log output, wait for process).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether captured output is logged.
    pub fn log_output(mut self, log: bool) -> Self {
        self.log_output = log;
        self
    }

    /// Set whether to wait for process termination.
    pub fn wait_for_process(mut self, wait: bool) -> Self {
        self.wait_for_process = wait;
        self
    }
}

/// Wrap an argument vector in an `ssh` invocation.
///
/// The option value keeps a trailing space (`"StrictHostKeyChecking=no "`)
/// for compatibility with the historical invocation.
pub fn ssh_argv<I, S>(target: &RemoteTarget, opts: &SshOptions, args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut wrapped = vec![
        "ssh".to_string(),
        "-q".to_string(),
        target.to_string(),
        "-o".to_string(),
        format!("StrictHostKeyChecking={} ", opts.host_key_value()),
    ];
    wrapped.extend(args.into_iter().map(Into::into));
    wrapped
}

/// Wrap a shell command line in an `ssh` invocation.
pub fn ssh_line(target: &RemoteTarget, opts: &SshOptions, line: &str) -> String {
    format!(
        "ssh -q {} -o StrictHostKeyChecking={} {}",
        target,
        opts.host_key_value(),
        line
    )
}

/// Build the `scp` command line copying a remote file to a local path.
pub fn scp_line(target: &RemoteTarget, opts: &SshOptions, from: &str, to: &str) -> String {
    format!(
        "scp -o StrictHostKeyChecking={} {}:{} {}",
        opts.host_key_value(),
        target,
        from,
        to
    )
}
