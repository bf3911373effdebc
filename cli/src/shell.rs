use std::io::{self, BufRead, Write};

use anyhow::Result;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tasklist_core::{
    parse_command, Command, EditOutcome, ListKind, StoreError, Task, TaskListStore, TextPrompt,
};
use tracing::debug;

const HELP: &str = "\
Commands (any unique prefix works, lists may be written p / c):
  add <text>               add a task to the pending list
  edit <list> <n> [text]   rename task n; without text the next line is read
  delete <list> <n>        remove task n
  complete <n>             move pending task n to completed
  reopen <n>               move completed task n back to pending
  list                     show both lists
  json                     print both lists as JSON
  help                     show this text
  quit                     leave";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Task")]
    text: String,
}

/// Line-oriented front end: one command per line, positions select tasks.
pub struct Shell<R, W> {
    input: R,
    out: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, interactive: bool) -> Self {
        Self {
            input,
            out,
            interactive,
        }
    }

    pub fn run(&mut self, store: &mut TaskListStore) -> Result<()> {
        if self.interactive {
            writeln!(self.out, "Type 'help' for commands.")?;
        }
        loop {
            if self.interactive {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = read_line(&mut self.input)? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.out, "Error: {}", err)?;
                    continue;
                }
            };
            debug!(?command, "shell command");
            if command == Command::Quit {
                break;
            }
            self.execute(store, command)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn execute(&mut self, store: &mut TaskListStore, command: Command) -> Result<()> {
        let result: Result<&str, StoreError> = match command {
            Command::Add(text) => store.add_pending(text).map(|_| "Task added."),
            Command::Edit {
                list,
                position,
                text,
            } => {
                let target = select(store, list, position);
                match text {
                    Some(text) => store
                        .edit_task(list, target.as_deref(), &text)
                        .map(|_| "Task updated."),
                    None => {
                        let mut prompt = LinePrompt {
                            input: &mut self.input,
                            out: &mut self.out,
                            interactive: self.interactive,
                        };
                        store
                            .edit_with(list, target.as_deref(), &mut prompt)
                            .map(|outcome| match outcome {
                                EditOutcome::Applied => "Task updated.",
                                EditOutcome::Cancelled => "Edit cancelled.",
                            })
                    }
                }
            }
            Command::Delete { list, position } => {
                let target = select(store, list, position);
                store
                    .delete_task(list, target.as_deref())
                    .map(|_| "Task deleted.")
            }
            Command::Complete { position } => {
                let target = select(store, ListKind::Pending, position);
                store
                    .mark_complete(target.as_deref())
                    .map(|_| "Task completed.")
            }
            Command::Reopen { position } => {
                let target = select(store, ListKind::Completed, position);
                store
                    .mark_pending(target.as_deref())
                    .map(|_| "Task reopened.")
            }
            Command::List => {
                for kind in ListKind::ALL {
                    let rendered = self.render_list(kind, store.list(kind));
                    writeln!(self.out, "{}", rendered)?;
                }
                return Ok(());
            }
            Command::Json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&store.snapshot())?)?;
                return Ok(());
            }
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };

        match result {
            Ok(message) => writeln!(self.out, "{}", message)?,
            Err(err) => writeln!(self.out, "Warning: {}", err)?,
        }
        Ok(())
    }

    fn render_list(&self, kind: ListKind, tasks: &[Task]) -> String {
        let title = match kind {
            ListKind::Pending => "Pending",
            ListKind::Completed => "Completed",
        };
        if tasks.is_empty() {
            return format!("{}: (empty)", title);
        }

        let rows = tasks.iter().enumerate().map(|(i, task)| TaskRow {
            position: i + 1,
            text: task.text().to_string(),
        });
        let mut table = Table::new(rows);
        table.with(Style::modern());
        if self.interactive {
            table.with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        }
        format!("{}:\n{}", title, table)
    }
}

/// Resolves a 1-based position to the task text it selects, if any.
fn select(store: &TaskListStore, list: ListKind, position: Option<usize>) -> Option<String> {
    position
        .and_then(|n| store.list(list).get(n.checked_sub(1)?))
        .map(|task| task.text().to_string())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let trimmed = buf.trim_end_matches(['\n', '\r']).len();
    buf.truncate(trimmed);
    Ok(Some(buf))
}

/// Reads replacement text from the shell's own input. End of input cancels.
struct LinePrompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
    interactive: bool,
}

impl<R: BufRead, W: Write> TextPrompt for LinePrompt<'_, R, W> {
    fn prompt(&mut self, current: &str) -> Option<String> {
        if self.interactive {
            let _ = write!(self.out, "New value for '{}': ", current);
            let _ = self.out.flush();
        }
        match read_line(self.input) {
            Ok(line) => line,
            Err(err) => {
                debug!(%err, "prompt read failed, treating as cancel");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(store: &mut TaskListStore, script: &str) -> String {
        let mut out = Vec::new();
        let mut shell = Shell::new(Cursor::new(script.as_bytes()), &mut out, false);
        shell.run(store).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn texts(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_add_complete_reopen() {
        let mut store = TaskListStore::new();
        let output = run_script(
            &mut store,
            "add Task A\nadd Task B\ncomplete 1\nreopen 1\n",
        );
        assert_eq!(texts(store.pending()), vec!["Task B", "Task A"]);
        assert!(store.completed().is_empty());
        assert_eq!(
            output,
            "Task added.\nTask added.\nTask completed.\nTask reopened.\n"
        );
    }

    #[test]
    fn test_failures_are_warnings() {
        let mut store = TaskListStore::new();
        let output = run_script(&mut store, "add\nadd    \ncomplete\ndelete c 4\nbogus\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Warning: task cannot be empty",
                "Warning: task cannot be empty",
                "Warning: please select an item to mark complete",
                "Warning: please select an item to remove",
                "Error: invalid command, unknown key: 'bogus'",
            ]
        );
        assert!(store.pending().is_empty());
    }

    #[test]
    fn test_edit_inline_and_prompted() {
        let mut store = TaskListStore::new();
        store.add_pending("Buy milk").unwrap();
        store.add_pending("Walk dog").unwrap();

        let output = run_script(&mut store, "edit p 1  Buy bread \ne p 2\nWalk cat\n");
        assert_eq!(texts(store.pending()), vec!["Buy bread", "Walk cat"]);
        assert_eq!(output, "Task updated.\nTask updated.\n");
    }

    #[test]
    fn test_prompted_edit_cancelled_at_end_of_input() {
        let mut store = TaskListStore::new();
        store.add_pending("Buy milk").unwrap();
        let revision = store.revision();

        let output = run_script(&mut store, "edit pending 1");
        assert_eq!(output, "Edit cancelled.\n");
        assert_eq!(texts(store.pending()), vec!["Buy milk"]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut store = TaskListStore::new();
        run_script(&mut store, "add one\nquit\nadd two\n");
        assert_eq!(texts(store.pending()), vec!["one"]);
    }

    #[test]
    fn test_list_and_json() {
        let mut store = TaskListStore::new();
        store.add_pending("a").unwrap();
        store.add_pending("b").unwrap();
        store.mark_complete(Some("b")).unwrap();

        let output = run_script(&mut store, "list\njson\n");
        assert!(output.starts_with("Pending:\n"));
        assert!(output.contains("Completed:\n"));
        assert!(output.contains("\"pending\": [\n    \"a\"\n  ]"));
        assert!(output.contains("\"completed\": [\n    \"b\"\n  ]"));
    }

    #[test]
    fn test_list_empty() {
        let mut store = TaskListStore::new();
        let output = run_script(&mut store, "l\n");
        assert_eq!(output, "Pending: (empty)\nCompleted: (empty)\n");
    }
}
