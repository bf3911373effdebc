use std::fmt;

use thiserror::Error;

use crate::model::ListKind;

/// The user action that needed a selected task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Remove,
    MarkComplete,
    MarkPending,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Edit => "edit",
            Action::Remove => "remove",
            Action::MarkComplete => "mark complete",
            Action::MarkPending => "mark pending",
        };
        f.write_str(verb)
    }
}

/// Reasons a store operation was rejected. A rejected operation never
/// changes either list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Task text was empty or whitespace-only.
    #[error("task cannot be empty")]
    EmptyInput,

    /// The operation needs a selected task and none was given.
    #[error("please select an item to {0}")]
    NoSelection(Action),

    /// The selected task is no longer in the list it was selected from.
    #[error("task '{task}' is not in the {list} list")]
    NotFound { list: ListKind, task: String },
}
