//! Command handle for containing views.
//!
//! A dashboard around the map adds desks through `DeskCommands` instead of
//! reaching into the map's state. Commands can also be queued and applied
//! later in order.

use dm_core::DeskId;
use std::collections::VecDeque;
use thiserror::Error;

/// Desk lifecycle commands a containing view may issue.
pub trait DeskCommands {
    /// Add one desk at the default position. `None` when not permitted.
    fn add_desk(&mut self) -> Option<DeskId>;

    /// Add `count` desks named `{prefix}{n:03}`, numbering from the current
    /// desk count plus one. Returns the new ids.
    fn add_multiple_desks(&mut self, prefix: &str, count: usize) -> Vec<DeskId>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
    AddDesk,
    AddMultiple { prefix: String, count: usize },
}

impl DeskCommand {
    pub fn apply(&self, target: &mut dyn DeskCommands) -> Vec<DeskId> {
        match self {
            DeskCommand::AddDesk => target.add_desk().into_iter().collect(),
            DeskCommand::AddMultiple { prefix, count } => target.add_multiple_desks(prefix, *count),
        }
    }
}

/// FIFO of pending desk commands.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<DeskCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DeskCommand) {
        self.queue.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Apply every queued command in order. Returns all created ids.
    pub fn apply_to(&mut self, target: &mut dyn DeskCommands) -> Vec<DeskId> {
        let mut created = Vec::new();
        while let Some(command) = self.queue.pop_front() {
            created.extend(command.apply(target));
        }
        created
    }
}

// ─── Bulk Add Form ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkAddError {
    #[error("desk id prefix must not be empty")]
    EmptyPrefix,
    #[error("desk count must be a positive integer, got {0:?}")]
    InvalidCount(String),
}

/// Validated input from a "bulk add" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAddRequest {
    pub prefix: String,
    pub count: usize,
}

impl BulkAddRequest {
    /// Validate raw form fields. The prefix is trimmed.
    pub fn parse(prefix: &str, count: &str) -> Result<Self, BulkAddError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(BulkAddError::EmptyPrefix);
        }
        let count = match count.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => return Err(BulkAddError::InvalidCount(count.to_string())),
        };
        Ok(Self {
            prefix: prefix.to_string(),
            count,
        })
    }

    pub fn into_command(self) -> DeskCommand {
        DeskCommand::AddMultiple {
            prefix: self.prefix,
            count: self.count,
        }
    }
}
