use std::fmt;

use serde::Serialize;

/// A single to-do entry. Tasks carry no identity beyond their text, so two
/// tasks with equal text are indistinguishable.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Task(String);

impl Task {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Task(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Task {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Task {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two lists a task lives in.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Pending,
    Completed,
}

impl Default for ListKind {
    fn default() -> Self {
        ListKind::Pending
    }
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Pending, ListKind::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Pending => "pending",
            ListKind::Completed => "completed",
        }
    }

    /// The list a move out of `self` lands in.
    pub fn other(&self) -> ListKind {
        match self {
            ListKind::Pending => ListKind::Completed,
            ListKind::Completed => ListKind::Pending,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_compares_by_text() {
        let task = Task::new("Buy milk");
        assert_eq!(task, "Buy milk");
        assert_eq!(task, Task::new("Buy milk".to_string()));
        assert_ne!(task, Task::new("Buy milk "));
    }

    #[test]
    fn test_list_kind_other() {
        assert_eq!(ListKind::Pending.other(), ListKind::Completed);
        assert_eq!(ListKind::Completed.other(), ListKind::Pending);
        assert_eq!(ListKind::default(), ListKind::Pending);
    }

    #[test]
    fn test_serialized_forms() {
        assert_eq!(serde_json::to_string(&Task::new("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&ListKind::Completed).unwrap(), "\"completed\"");
    }
}
