use super::task::{ListKind, Task};

/// An applied mutation, delivered to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added { list: ListKind, task: Task },
    Edited { list: ListKind, from: Task, to: Task },
    Removed { list: ListKind, task: Task },
    Moved { from: ListKind, to: ListKind, task: Task },
}

impl StoreChange {
    /// Short human-readable description, used by the shells' activity output.
    pub fn describe(&self) -> String {
        match self {
            StoreChange::Added { list, task } => format!("added '{}' to {}", task, list),
            StoreChange::Edited { from, to, .. } => format!("renamed '{}' to '{}'", from, to),
            StoreChange::Removed { list, task } => format!("removed '{}' from {}", task, list),
            StoreChange::Moved { to, task, .. } => format!("moved '{}' to {}", task, to),
        }
    }
}
