// src/exec/command.rs

//! Command values and the events a running command reports.

use std::fmt;

use tokio::sync::mpsc;

/// An executable plus its argument vector. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a `git` invocation.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    /// Short label used in notices, e.g. `git commit`.
    pub fn label(&self) -> String {
        match self.args.first() {
            Some(sub) => format!("{} {}", self.program, sub),
            None => self.program.clone(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// How a command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal exit with the given code.
    Code(i32),
    /// Killed by a signal (number when the platform reports one).
    Signal(Option<i32>),
    /// The process never started (missing executable, bad working directory).
    LaunchFailed(String),
    /// Killed after exceeding the configured per-command timeout.
    TimedOut(u64),
}

impl ExitStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitStatus::Code(0))
    }

    pub(crate) fn from_std(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitStatus::Code(code);
        }
        ExitStatus::Signal(signal_of(status))
    }
}

#[cfg(unix)]
fn signal_of(status: std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: std::process::ExitStatus) -> Option<i32> {
    None
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "exited with code {code}"),
            ExitStatus::Signal(Some(sig)) => write!(f, "was terminated by signal {sig}"),
            ExitStatus::Signal(None) => f.write_str("was terminated abnormally"),
            ExitStatus::LaunchFailed(reason) => write!(f, "failed to launch: {reason}"),
            ExitStatus::TimedOut(secs) => write!(f, "timed out after {secs}s"),
        }
    }
}

/// Something a running command reported.
///
/// A well-behaved runner sends any number of output chunks followed by
/// exactly one `Exited`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    Stdout(String),
    Stderr(String),
    Exited(ExitStatus),
}

/// Receiving end for one running command.
#[derive(Debug)]
pub struct CommandHandle {
    rx: mpsc::Receiver<CommandEvent>,
    finished: bool,
}

impl CommandHandle {
    pub fn new(rx: mpsc::Receiver<CommandEvent>) -> Self {
        Self {
            rx,
            finished: false,
        }
    }

    /// Next event, or `None` after the terminal `Exited` has been returned.
    ///
    /// If the runner goes away without reporting an exit, a synthetic
    /// `LaunchFailed` is returned so the caller is never left waiting.
    pub async fn next_event(&mut self) -> Option<CommandEvent> {
        if self.finished {
            return None;
        }
        match self.rx.recv().await {
            Some(event) => {
                if matches!(event, CommandEvent::Exited(_)) {
                    self.finished = true;
                }
                Some(event)
            }
            None => {
                self.finished = true;
                Some(CommandEvent::Exited(ExitStatus::LaunchFailed(
                    "runner closed without reporting an exit status".to_string(),
                )))
            }
        }
    }
}
