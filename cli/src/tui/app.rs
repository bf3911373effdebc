use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::Local;
use ratatui::widgets::ListState;
use tasklist_core::{Action, ListKind, StoreError, TaskListStore};

const ACTIVITY_LIMIT: usize = 20;

pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

pub struct App {
    pub store: TaskListStore,
    pub focus: ListKind,
    pub pending_state: ListState,
    pub completed_state: ListState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub warning: Option<String>,
    pub activity: Rc<RefCell<VecDeque<String>>>,
    editing: Option<(ListKind, String)>,
    seen_revision: u64,
}

impl App {
    pub fn new(mut store: TaskListStore) -> App {
        let seen_revision = store.revision();
        let activity = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&activity);
        store.subscribe(move |change| {
            let mut log = sink.borrow_mut();
            if log.len() == ACTIVITY_LIMIT {
                log.pop_front();
            }
            log.push_back(format!(
                "{} {}",
                Local::now().format("%H:%M:%S"),
                change.describe()
            ));
        });

        let mut app = App {
            store,
            focus: ListKind::Pending,
            pending_state: ListState::default(),
            completed_state: ListState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            warning: None,
            activity,
            editing: None,
            seen_revision,
        };
        app.clamp_selection();
        app
    }

    pub fn state(&self, kind: ListKind) -> &ListState {
        match kind {
            ListKind::Pending => &self.pending_state,
            ListKind::Completed => &self.completed_state,
        }
    }

    fn state_mut(&mut self, kind: ListKind) -> &mut ListState {
        match kind {
            ListKind::Pending => &mut self.pending_state,
            ListKind::Completed => &mut self.completed_state,
        }
    }

    pub fn latest_activity(&self) -> Option<String> {
        self.activity.borrow().back().cloned()
    }

    /// Text of the highlighted task in the focused list.
    pub fn selected_task(&self) -> Option<String> {
        let index = self.state(self.focus).selected()?;
        self.store
            .list(self.focus)
            .get(index)
            .map(|task| task.text().to_string())
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn next(&mut self) {
        let len = self.store.list(self.focus).len();
        if len == 0 {
            return;
        }

        let state = self.state_mut(self.focus);
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.list(self.focus).len();
        if len == 0 {
            return;
        }

        let state = self.state_mut(self.focus);
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    /// Completes a pending task or reopens a completed one.
    pub fn toggle_status(&mut self) {
        let target = self.selected_task();
        let result = match self.focus {
            ListKind::Pending => self.store.mark_complete(target.as_deref()),
            ListKind::Completed => self.store.mark_pending(target.as_deref()),
        };
        self.report(result);
    }

    pub fn delete_task(&mut self) {
        let target = self.selected_task();
        let result = self.store.delete_task(self.focus, target.as_deref());
        self.report(result);
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        match self.selected_task() {
            Some(target) => {
                self.input = target.clone();
                self.cursor_position = self.input.chars().count();
                self.editing = Some((self.focus, target));
                self.input_mode = InputMode::Editing;
            }
            None => self.report(Err(StoreError::NoSelection(Action::Edit))),
        }
    }

    /// Leaves input mode without submitting. An open edit ends as cancelled.
    pub fn exit_input_mode(&mut self) {
        if let Some((list, target)) = self.editing.take() {
            let mut cancel = |_: &str| -> Option<String> { None };
            let result = self.store.edit_with(list, Some(target.as_str()), &mut cancel);
            self.report(result.map(|_| ()));
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self, char_position: usize) -> usize {
        self.input
            .chars()
            .take(char_position)
            .map(|c| c.len_utf8())
            .sum()
    }

    pub fn submit_command(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
    }

    fn submit_add(&mut self) {
        let result = self.store.add_pending(self.input.as_str());
        if result.is_ok() {
            let last = self.store.pending().len() - 1;
            self.focus = ListKind::Pending;
            self.pending_state.select(Some(last));
        }
        self.report(result);
    }

    fn submit_edit(&mut self) {
        if let Some((list, target)) = self.editing.take() {
            let text = self.input.clone();
            let mut submit = |_: &str| Some(text.clone());
            let result = self.store.edit_with(list, Some(target.as_str()), &mut submit);
            self.report(result.map(|_| ()));
        }
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    fn report(&mut self, result: Result<(), StoreError>) {
        if let Err(err) = result {
            self.warning = Some(err.to_string());
        }
        self.sync();
    }

    /// Keeps both selections inside their lists after the store changed.
    pub fn sync(&mut self) {
        if self.store.revision() != self.seen_revision {
            self.seen_revision = self.store.revision();
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        for kind in ListKind::ALL {
            let len = self.store.list(kind).len();
            let state = self.state_mut(kind);
            let selected = match state.selected() {
                _ if len == 0 => None,
                Some(i) if i >= len => Some(len - 1),
                Some(i) => Some(i),
                None => Some(0),
            };
            state.select(selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(pending: &[&str]) -> App {
        let mut store = TaskListStore::new();
        for text in pending {
            store.add_pending(*text).unwrap();
        }
        App::new(store)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    #[test]
    fn test_add_selects_new_task() {
        let mut app = app_with(&["a"]);
        app.enter_add_mode();
        type_text(&mut app, "b");
        app.submit_command();

        assert_eq!(app.selected_task().as_deref(), Some("b"));
        assert!(app.warning.is_none());
        assert!(app.latest_activity().unwrap().ends_with("added 'b' to pending"));
    }

    #[test]
    fn test_empty_add_warns() {
        let mut app = app_with(&[]);
        app.enter_add_mode();
        type_text(&mut app, "  ");
        app.submit_command();

        assert_eq!(app.warning.as_deref(), Some("task cannot be empty"));
        assert!(app.store.pending().is_empty());
        app.dismiss_warning();
        assert!(app.warning.is_none());
    }

    #[test]
    fn test_toggle_moves_between_lists() {
        let mut app = app_with(&["Task A", "Task B"]);
        app.toggle_status();
        assert_eq!(app.store.completed()[0], "Task A");
        assert_eq!(app.selected_task().as_deref(), Some("Task B"));

        app.switch_focus();
        assert_eq!(app.selected_task().as_deref(), Some("Task A"));
        app.toggle_status();
        assert!(app.store.completed().is_empty());
        assert_eq!(app.completed_state.selected(), None);
        assert_eq!(app.store.pending()[1], "Task A");
    }

    #[test]
    fn test_edit_and_cancel() {
        let mut app = app_with(&["Buy milk"]);

        app.enter_edit_mode();
        assert_eq!(app.input, "Buy milk");
        app.input_char('!');
        app.exit_input_mode();
        assert_eq!(app.store.pending()[0], "Buy milk");
        assert!(app.warning.is_none());

        app.enter_edit_mode();
        for _ in 0.."milk".len() {
            app.delete_char();
        }
        type_text(&mut app, "bread ");
        app.submit_command();
        assert_eq!(app.store.pending()[0], "Buy bread");
    }

    #[test]
    fn test_actions_without_selection_warn() {
        let mut app = app_with(&[]);
        app.enter_edit_mode();
        assert_eq!(app.warning.as_deref(), Some("please select an item to edit"));
        assert!(matches!(app.input_mode, InputMode::Normal));

        app.delete_task();
        assert_eq!(app.warning.as_deref(), Some("please select an item to remove"));
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut app = app_with(&["a", "b"]);
        app.next();
        app.delete_task();
        assert_eq!(app.pending_state.selected(), Some(0));
        app.delete_task();
        assert_eq!(app.pending_state.selected(), None);
    }

    #[test]
    fn test_cursor_handles_multibyte_input() {
        let mut app = app_with(&[]);
        app.enter_add_mode();
        type_text(&mut app, "héllo");
        app.move_cursor_left();
        app.move_cursor_left();
        app.move_cursor_left();
        app.delete_char();
        assert_eq!(app.input, "hllo");
    }
}
