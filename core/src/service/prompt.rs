/// Source of replacement text for the prompt-driven edit flow. Returning
/// `None` means the user cancelled before submitting.
pub trait TextPrompt {
    fn prompt(&mut self, current: &str) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt(&mut self, current: &str) -> Option<String> {
        self(current)
    }
}

/// Result of an edit that reached the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Cancelled,
}
