use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use vaultsync::exec::{CommandEvent, CommandHandle, CommandRunner, CommandSpec, ExitStatus};

#[derive(Debug, Clone)]
struct Rule {
    args_prefix: Vec<String>,
    output: Vec<CommandEvent>,
    status: Option<ExitStatus>,
}

impl Rule {
    fn matches(&self, command: &CommandSpec) -> bool {
        command.args.len() >= self.args_prefix.len()
            && command.args.iter().zip(&self.args_prefix).all(|(a, p)| a == p)
    }
}

#[derive(Debug, Default)]
struct State {
    rules: Vec<Rule>,
    spawned: Vec<(CommandSpec, PathBuf)>,
}

/// A fake runner that:
/// - records every command it is asked to spawn (and the cwd)
/// - replies from a script: optional output chunks, then an exit status
///   (`Code(0)` unless a rule says otherwise).
///
/// Rules match on an argument prefix, so `["stash", "pop"]` only hits
/// `git stash pop` while `["stash"]` hits both stash commands. The most
/// recently added matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    state: Arc<Mutex<State>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `args_prefix` exit with `status`.
    pub fn exit_with(self, args_prefix: &[&str], status: ExitStatus) -> Self {
        self.push_rule(args_prefix, Vec::new(), Some(status));
        self
    }

    /// Commands starting with `args_prefix` exit with `code`.
    pub fn fail_on(self, args_prefix: &[&str], code: i32) -> Self {
        self.exit_with(args_prefix, ExitStatus::Code(code))
    }

    /// Commands starting with `args_prefix` print these chunks first.
    pub fn with_output(self, args_prefix: &[&str], output: Vec<CommandEvent>) -> Self {
        self.push_rule(args_prefix, output, None);
        self
    }

    fn push_rule(&self, args_prefix: &[&str], output: Vec<CommandEvent>, status: Option<ExitStatus>) {
        let mut state = self.state.lock().unwrap();
        state.rules.push(Rule {
            args_prefix: args_prefix.iter().map(|s| s.to_string()).collect(),
            output,
            status,
        });
    }

    /// Every spawned command, in order.
    pub fn spawned(&self) -> Vec<CommandSpec> {
        let state = self.state.lock().unwrap();
        state.spawned.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Spawned commands rendered as `git add .` etc.
    pub fn spawned_lines(&self) -> Vec<String> {
        self.spawned().iter().map(|c| c.to_string()).collect()
    }

    /// Working directories used, in spawn order.
    pub fn spawned_cwds(&self) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        state.spawned.iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn spawn_count(&self) -> usize {
        self.state.lock().unwrap().spawned.len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn spawn(&self, command: &CommandSpec, cwd: &Path) -> CommandHandle {
        let (output, status) = {
            let mut state = self.state.lock().unwrap();
            state.spawned.push((command.clone(), cwd.to_path_buf()));

            let mut output = Vec::new();
            let mut status = None;
            for rule in state.rules.iter().filter(|r| r.matches(command)) {
                if !rule.output.is_empty() {
                    output = rule.output.clone();
                }
                if rule.status.is_some() {
                    status = rule.status.clone();
                }
            }
            (output, status.unwrap_or(ExitStatus::Code(0)))
        };

        let (tx, rx) = mpsc::channel(output.len() + 1);
        for event in output {
            tx.try_send(event).expect("channel sized for scripted output");
        }
        tx.try_send(CommandEvent::Exited(status))
            .expect("channel sized for scripted exit");

        CommandHandle::new(rx)
    }
}
