pub mod prompt;
pub mod task_list_store;

pub use prompt::{EditOutcome, TextPrompt};
pub use task_list_store::{SubscriptionId, TaskListStore};
