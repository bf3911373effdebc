use crate::model::{ListKind, Task};
use crate::repository::traits::TaskListRepository;

/// Two plain vectors. Contents live only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskLists {
    pending: Vec<Task>,
    completed: Vec<Task>,
}

impl InMemoryTaskLists {
    pub fn new() -> Self {
        Self::default()
    }

    fn vec_mut(&mut self, kind: ListKind) -> &mut Vec<Task> {
        match kind {
            ListKind::Pending => &mut self.pending,
            ListKind::Completed => &mut self.completed,
        }
    }
}

impl TaskListRepository for InMemoryTaskLists {
    fn list(&self, kind: ListKind) -> &[Task] {
        match kind {
            ListKind::Pending => &self.pending,
            ListKind::Completed => &self.completed,
        }
    }

    fn push(&mut self, kind: ListKind, task: Task) {
        self.vec_mut(kind).push(task);
    }

    fn replace(&mut self, kind: ListKind, index: usize, task: Task) -> Task {
        std::mem::replace(&mut self.vec_mut(kind)[index], task)
    }

    fn remove(&mut self, kind: ListKind, index: usize) -> Task {
        self.vec_mut(kind).remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_independent() {
        let mut repo = InMemoryTaskLists::new();
        repo.push(ListKind::Pending, Task::new("a"));
        repo.push(ListKind::Completed, Task::new("a"));
        repo.push(ListKind::Pending, Task::new("b"));

        assert_eq!(repo.list(ListKind::Pending).len(), 2);
        assert_eq!(repo.list(ListKind::Completed).len(), 1);

        let removed = repo.remove(ListKind::Pending, 0);
        assert_eq!(removed, "a");
        assert_eq!(repo.list(ListKind::Pending), &[Task::new("b")]);
        assert_eq!(repo.list(ListKind::Completed), &[Task::new("a")]);
    }

    #[test]
    fn test_position_finds_first_match() {
        let mut repo = InMemoryTaskLists::new();
        for text in ["x", "dup", "dup"] {
            repo.push(ListKind::Pending, Task::new(text));
        }
        assert_eq!(repo.position(ListKind::Pending, "dup"), Some(1));
        assert_eq!(repo.position(ListKind::Pending, "missing"), None);
        assert_eq!(repo.position(ListKind::Completed, "x"), None);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut repo = InMemoryTaskLists::new();
        repo.push(ListKind::Completed, Task::new("old"));
        let previous = repo.replace(ListKind::Completed, 0, Task::new("new"));
        assert_eq!(previous, "old");
        assert_eq!(repo.list(ListKind::Completed), &[Task::new("new")]);
    }
}
