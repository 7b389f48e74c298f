// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] defines command values, exit statuses and the per-command
//!   event stream.
//! - [`backend`] provides the `CommandRunner` trait the chain executor uses.
//! - [`process`] is the `tokio::process` implementation used in production;
//!   tests substitute a scripted runner.

pub mod backend;
pub mod command;
pub mod process;

pub use backend::CommandRunner;
pub use command::{CommandEvent, CommandHandle, CommandSpec, ExitStatus};
pub use process::ProcessRunner;
