//! Per-frame command buffer for structural scene changes

use std::collections::VecDeque;

use crate::ecs::EntityId;

/// A pending structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Add the entity to the live list, then run its `start` hook
    Insert(EntityId),
    /// Drop the entity from the live list and the scene
    Remove(EntityId),
}

/// FIFO queue of [`SceneCommand`]s
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: VecDeque<SceneCommand>,
}

impl CommandBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command
    pub fn push(&mut self, command: SceneCommand) {
        self.commands.push_back(command);
    }

    /// Take the oldest command
    pub fn pop(&mut self) -> Option<SceneCommand> {
        self.commands.pop_front()
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Pending commands in execution order
    pub fn iter(&self) -> impl Iterator<Item = &SceneCommand> {
        self.commands.iter()
    }
}
