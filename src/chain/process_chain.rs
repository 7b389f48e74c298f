// src/chain/process_chain.rs

use std::sync::Arc;

use crate::exec::CommandSpec;

/// Ordered list of commands drained front to back.
///
/// The command list itself is immutable and shared; draining only moves a
/// cursor, so a consumed command can never be handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessChain {
    commands: Arc<[CommandSpec]>,
    cursor: usize,
}

impl ProcessChain {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self {
            commands: commands.into(),
            cursor: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Total number of commands, consumed or not.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands not yet handed out.
    pub fn remaining(&self) -> &[CommandSpec] {
        &self.commands[self.cursor..]
    }

    /// All commands in order, regardless of cursor position.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Take the next command, advancing the cursor.
    pub fn next_command(&mut self) -> Option<&CommandSpec> {
        let command = self.commands.get(self.cursor)?;
        self.cursor += 1;
        Some(command)
    }
}

impl From<Vec<CommandSpec>> for ProcessChain {
    fn from(commands: Vec<CommandSpec>) -> Self {
        Self::new(commands)
    }
}
