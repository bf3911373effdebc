use crate::model::{ListKind, Task};

/// Backing storage for the two task lists. The store validates every
/// operation before calling in, so implementations may assume indices are
/// in bounds.
pub trait TaskListRepository {
    fn list(&self, kind: ListKind) -> &[Task];
    fn push(&mut self, kind: ListKind, task: Task);
    fn replace(&mut self, kind: ListKind, index: usize, task: Task) -> Task;
    fn remove(&mut self, kind: ListKind, index: usize) -> Task;

    /// Index of the first task whose text equals `text`.
    fn position(&self, kind: ListKind, text: &str) -> Option<usize> {
        self.list(kind).iter().position(|t| t.text() == text)
    }
}
