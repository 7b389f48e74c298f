// src/lib.rs

pub mod chain;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod notice;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::chain::{ChainExecutor, ProcessChain};
use crate::cli::CliArgs;
use crate::config::{default_settings_path, SettingsStore, SyncConfig, TomlSettingsStore};
use crate::engine::workflows::{publish_chain, reconcile_chain};
use crate::engine::{discover_root, Clock, CoreRuntime, Runtime, RuntimeOptions, SyncEvent, SystemClock};
use crate::exec::ProcessRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::notice::{ConsoleNotifier, Notifier};
use crate::watch::ChangeFilter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - root discovery and settings loading
/// - the core / runtime pair
/// - the process-backed chain executor
/// - (optional) file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let requested_root = requested_root(&args);
    let root = discover_root(fs.as_ref(), &requested_root);

    let settings_path = match args.config {
        Some(ref path) => PathBuf::from(path),
        None => default_settings_path(root.as_deref().unwrap_or(&requested_root)),
    };
    let store = TomlSettingsStore::with_fs(settings_path, Arc::clone(&fs));
    let config = apply_overrides(store.load()?, &args)?;

    if args.save_settings {
        store.save(&config)?;
        println!("settings written to {}", store.path().display());
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&config, root.as_deref());
        return Ok(());
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let load_time = clock.now();

    let (rt_tx, rt_rx) = mpsc::channel::<SyncEvent>(64);

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let runner = ProcessRunner::with_timeout(config.command_timeout());
    let executor = ChainExecutor::new(runner, notifier, config.notice_duration());

    // No watching in --once mode, and nothing to watch without a root.
    let _watcher_handle = match root {
        Some(ref dir) if !args.once => {
            let filter = ChangeFilter::new(config.exclude())?;
            Some(crate::watch::spawn_watcher(dir.clone(), filter, rt_tx.clone())?)
        }
        _ => None,
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SyncEvent::ShutdownRequested).await;
        });
    }

    info!(
        root = ?root,
        branch = config.branch(),
        remote = config.remote(),
        min_commit_delay_secs = config.min_commit_delay().as_secs(),
        "vaultsync starting"
    );

    let options = RuntimeOptions {
        exit_when_idle: args.once,
    };
    let core = CoreRuntime::new(config, root, load_time, options);
    let runtime = Runtime::new(core, rt_rx, rt_tx, executor, clock);
    runtime.run().await?;
    Ok(())
}

fn requested_root(args: &CliArgs) -> PathBuf {
    match args.root {
        Some(ref root) => PathBuf::from(root),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Apply CLI overrides on top of the stored settings and re-validate.
pub fn apply_overrides(config: SyncConfig, args: &CliArgs) -> Result<SyncConfig> {
    let mut raw = config.into_raw();
    if let Some(ref branch) = args.branch {
        raw.branch = branch.clone();
    }
    if let Some(ref remote) = args.remote {
        raw.remote = remote.clone();
    }
    if let Some(delay) = args.min_commit_delay {
        raw.min_commit_delay_seconds = delay;
    }
    Ok(SyncConfig::try_from(raw)?)
}

/// Simple dry-run output: settings and both chains.
fn print_dry_run(config: &SyncConfig, root: Option<&Path>) {
    println!("vaultsync dry-run");
    match root {
        Some(root) => println!("  root = {}", root.display()),
        None => println!("  root = <none> (no-op mode: no chains would run)"),
    }
    println!("  branch = {}", config.branch());
    println!("  remote = {}", config.remote());
    println!("  min_commit_delay = {}s", config.min_commit_delay().as_secs());
    println!("  busy_behaviour = {:?}", config.busy_behaviour());
    println!("  queue_length = {}", config.queue_length());
    if let Some(timeout) = config.command_timeout() {
        println!("  command_timeout = {}s", timeout.as_secs());
    }
    println!();

    print_chain("startup reconciliation", &reconcile_chain(config, &Local::now()));
    print_chain(
        "publish (per change)",
        &publish_chain(config, "<file>", Utc::now()),
    );

    debug!("dry-run complete (no execution)");
}

fn print_chain(title: &str, chain: &ProcessChain) {
    println!("{title} ({} steps):", chain.len());
    for (i, command) in chain.commands().iter().enumerate() {
        println!("  {}. {command}", i + 1);
    }
}
