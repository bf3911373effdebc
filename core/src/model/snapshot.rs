use serde::Serialize;

use super::task::Task;

/// Owned copy of both lists at a point in time.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}
