use tracing::debug;

use crate::error::{Action, StoreError};
use crate::model::{ListKind, Snapshot, StoreChange, Task};
use crate::repository::{InMemoryTaskLists, TaskListRepository};
use crate::service::prompt::{EditOutcome, TextPrompt};

type Listener = Box<dyn FnMut(&StoreChange)>;

/// Handle returned by [`TaskListStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Sole owner and mutator of the pending and completed lists.
///
/// Tasks are located by text: every operation that takes a `target` acts on
/// the first task in the list whose text equals it. `target` is the caller's
/// current selection, `None` when nothing is selected.
pub struct TaskListStore<R: TaskListRepository = InMemoryTaskLists> {
    repo: R,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::with_repository(InMemoryTaskLists::new())
    }
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TaskListRepository> TaskListStore<R> {
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn pending(&self) -> &[Task] {
        self.repo.list(ListKind::Pending)
    }

    pub fn completed(&self) -> &[Task] {
        self.repo.list(ListKind::Completed)
    }

    pub fn list(&self, kind: ListKind) -> &[Task] {
        self.repo.list(kind)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pending: self.pending().to_vec(),
            completed: self.completed().to_vec(),
        }
    }

    /// Number of changes applied so far. Rejected and cancelled operations
    /// leave it untouched, so renderers can compare it to decide on a redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Appends `text` verbatim to the end of the pending list.
    pub fn add_pending(&mut self, text: impl Into<String>) -> Result<(), StoreError> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("add rejected: empty input");
            return Err(StoreError::EmptyInput);
        }
        let task = Task::new(text);
        self.repo.push(ListKind::Pending, task.clone());
        self.commit(StoreChange::Added {
            list: ListKind::Pending,
            task,
        });
        Ok(())
    }

    /// Replaces `target` in `list` with the trimmed `new_text`, keeping its
    /// position.
    pub fn edit_task(
        &mut self,
        list: ListKind,
        target: Option<&str>,
        new_text: &str,
    ) -> Result<(), StoreError> {
        self.try_edit(list, target, new_text)
            .inspect_err(|err| debug!(%list, %err, "edit rejected"))
    }

    /// Edit flow driven by a prompt: the selection is checked first, then the
    /// prompt is asked for replacement text seeded with the current text.
    pub fn edit_with<P>(
        &mut self,
        list: ListKind,
        target: Option<&str>,
        prompt: &mut P,
    ) -> Result<EditOutcome, StoreError>
    where
        P: TextPrompt + ?Sized,
    {
        let Some(target) = target else {
            debug!(%list, "edit rejected: nothing selected");
            return Err(StoreError::NoSelection(Action::Edit));
        };
        match prompt.prompt(target) {
            Some(new_text) => {
                self.edit_task(list, Some(target), &new_text)?;
                Ok(EditOutcome::Applied)
            }
            None => {
                debug!(%list, target, "edit cancelled");
                Ok(EditOutcome::Cancelled)
            }
        }
    }

    pub fn delete_task(&mut self, list: ListKind, target: Option<&str>) -> Result<(), StoreError> {
        self.try_delete(list, target)
            .inspect_err(|err| debug!(%list, %err, "delete rejected"))
    }

    /// Moves `target` from pending to the end of completed.
    pub fn mark_complete(&mut self, target: Option<&str>) -> Result<(), StoreError> {
        self.move_task(ListKind::Pending, target, Action::MarkComplete)
    }

    /// Moves `target` from completed to the end of pending.
    pub fn mark_pending(&mut self, target: Option<&str>) -> Result<(), StoreError> {
        self.move_task(ListKind::Completed, target, Action::MarkPending)
    }

    fn try_edit(
        &mut self,
        list: ListKind,
        target: Option<&str>,
        new_text: &str,
    ) -> Result<(), StoreError> {
        let target = target.ok_or(StoreError::NoSelection(Action::Edit))?;
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        let index = self.locate(list, target)?;
        let to = Task::new(trimmed);
        let from = self.repo.replace(list, index, to.clone());
        self.commit(StoreChange::Edited { list, from, to });
        Ok(())
    }

    fn try_delete(&mut self, list: ListKind, target: Option<&str>) -> Result<(), StoreError> {
        let target = target.ok_or(StoreError::NoSelection(Action::Remove))?;
        let index = self.locate(list, target)?;
        let task = self.repo.remove(list, index);
        self.commit(StoreChange::Removed { list, task });
        Ok(())
    }

    fn move_task(
        &mut self,
        from: ListKind,
        target: Option<&str>,
        action: Action,
    ) -> Result<(), StoreError> {
        let result = target
            .ok_or(StoreError::NoSelection(action))
            .and_then(|target| self.locate(from, target));
        let index = match result {
            Ok(index) => index,
            Err(err) => {
                debug!(%from, %err, "move rejected");
                return Err(err);
            }
        };
        let to = from.other();
        let task = self.repo.remove(from, index);
        self.repo.push(to, task.clone());
        self.commit(StoreChange::Moved { from, to, task });
        Ok(())
    }

    fn locate(&self, list: ListKind, target: &str) -> Result<usize, StoreError> {
        self.repo
            .position(list, target)
            .ok_or_else(|| StoreError::NotFound {
                list,
                task: target.to_string(),
            })
    }

    fn commit(&mut self, change: StoreChange) {
        self.revision += 1;
        debug!(revision = self.revision, change = %change.describe(), "store changed");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}
