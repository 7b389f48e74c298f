// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The chain executor talks to a `CommandRunner` instead of spawning
//! processes itself, so tests can script exit codes without touching `git`.
//! Production code uses [`ProcessRunner`](super::process::ProcessRunner).

use std::path::Path;

use super::command::{CommandHandle, CommandSpec};

/// Starts one external command and hands back its event stream.
pub trait CommandRunner: Send + Sync {
    /// Start `command` in `cwd` and return immediately.
    ///
    /// The returned handle must eventually yield exactly one
    /// `CommandEvent::Exited`, including when the command cannot be launched.
    fn spawn(&self, command: &CommandSpec, cwd: &Path) -> CommandHandle;
}
