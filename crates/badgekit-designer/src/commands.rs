use uuid::Uuid;

/// An edit of the design queue, applied by whoever owns the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueCommand {
    /// Remove the item with this id.
    Remove { id: Uuid },
    /// Remove the item at this position.
    RemoveAt { index: usize },
    /// Remove every item.
    Clear,
}

impl QueueCommand {
    /// Returns the name of the command for display.
    pub fn name(&self) -> &str {
        match self {
            QueueCommand::Remove { .. } => "Remove Design",
            QueueCommand::RemoveAt { .. } => "Remove Design",
            QueueCommand::Clear => "Clear Queue",
        }
    }
}
