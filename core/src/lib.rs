pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{Action, StoreError};
pub use input::{expand_key, parse_command, parse_list, Command, CommandError, KeyError};
pub use model::{ListKind, Snapshot, StoreChange, Task};
pub use repository::{InMemoryTaskLists, TaskListRepository};
pub use service::{EditOutcome, SubscriptionId, TaskListStore, TextPrompt};
