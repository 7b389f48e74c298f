// src/exec/process.rs

//! Production command runner on top of `tokio::process`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::backend::CommandRunner;
use super::command::{CommandEvent, CommandHandle, CommandSpec, ExitStatus};

/// How long output is still forwarded after the child exits when no timeout
/// is configured.
const OUTPUT_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Runs commands as real OS processes.
///
/// Each `spawn` starts a Tokio task that owns the child, so it must be called
/// from within a Tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill any command still running after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    fn spawn(&self, command: &CommandSpec, cwd: &Path) -> CommandHandle {
        let (tx, rx) = mpsc::channel::<CommandEvent>(64);
        let command = command.clone();
        let cwd = cwd.to_path_buf();
        let timeout = self.timeout;

        tokio::spawn(async move {
            run_process(command, cwd, timeout, tx).await;
        });

        CommandHandle::new(rx)
    }
}

/// Run a single process and always finish with `CommandEvent::Exited`.
async fn run_process(
    command: CommandSpec,
    cwd: PathBuf,
    timeout: Option<Duration>,
    tx: mpsc::Sender<CommandEvent>,
) {
    let status = match run_process_inner(&command, &cwd, timeout, &tx).await {
        Ok(status) => status,
        Err(err) => {
            error!(command = %command, cwd = ?cwd, error = %err, "command execution error");
            ExitStatus::LaunchFailed(format!("{err:#}"))
        }
    };

    if tx.send(CommandEvent::Exited(status)).await.is_err() {
        debug!(command = %command, "exit status dropped; nobody is listening");
    }
}

async fn run_process_inner(
    command: &CommandSpec,
    cwd: &Path,
    timeout: Option<Duration>,
    tx: &mpsc::Sender<CommandEvent>,
) -> Result<ExitStatus> {
    info!(command = %command, cwd = ?cwd, "starting command");

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning `{command}` in {cwd:?}"))?;

    let stdout_task = child
        .stdout
        .take()
        .map(|out| tokio::spawn(forward_chunks(out, tx.clone(), CommandEvent::Stdout)));
    let stderr_task = child
        .stderr
        .take()
        .map(|err| tokio::spawn(forward_chunks(err, tx.clone(), CommandEvent::Stderr)));

    let deadline = timeout.map(|limit| Instant::now() + limit);
    let waited = match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, child.wait()).await.ok(),
        None => Some(child.wait().await),
    };

    let status = match waited {
        Some(result) => {
            let status = result.with_context(|| format!("waiting for `{command}`"))?;
            // Background children may inherit the pipes; stop forwarding at the
            // command's deadline instead of waiting for them to exit.
            let drain_until =
                deadline.unwrap_or_else(|| Instant::now() + OUTPUT_DRAIN_GRACE);
            drain_reader(stdout_task, drain_until, command).await;
            drain_reader(stderr_task, drain_until, command).await;
            ExitStatus::from_std(status)
        }
        None => {
            let secs = timeout.map(|d| d.as_secs()).unwrap_or_default();
            warn!(command = %command, timeout_secs = secs, "command timed out; killing process");
            if let Err(e) = child.kill().await {
                warn!(command = %command, error = %e, "failed to kill timed-out process");
            }
            // Grandchildren (e.g. ssh) may still hold the pipes open.
            abort_reader(stdout_task);
            abort_reader(stderr_task);
            ExitStatus::TimedOut(secs)
        }
    };

    info!(command = %command, status = %status, success = status.is_success(), "command finished");
    Ok(status)
}

/// Forward raw output chunks until EOF.
async fn forward_chunks<R>(
    mut reader: R,
    tx: mpsc::Sender<CommandEvent>,
    wrap: fn(String) -> CommandEvent,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut buf = vec![0u8; 8 * 1024];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                if tx.send(wrap(chunk)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(error = %e, "output pipe read failed");
                break;
            }
        }
    }
}

/// Wait for a reader to hit EOF, aborting it once `until` passes.
async fn drain_reader(task: Option<JoinHandle<()>>, until: Instant, command: &CommandSpec) {
    let Some(mut task) = task else {
        return;
    };
    match tokio::time::timeout_at(until, &mut task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(error = %e, "output reader task failed"),
        Err(_) => {
            warn!(command = %command, "output pipe still open after exit; dropping remaining output");
            task.abort();
        }
    }
}

fn abort_reader(task: Option<JoinHandle<()>>) {
    if let Some(task) = task {
        task.abort();
    }
}
