use thiserror::Error;

use crate::model::ListKind;

/// Verbs understood by the line shell, in help order.
pub const COMMANDS: [&str; 9] = [
    "add", "edit", "delete", "complete", "reopen", "list", "json", "help", "quit",
];

const LISTS: [&str; 2] = ["pending", "completed"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key: '{0}'")]
    Unknown(String),
    #[error("ambiguous key: '{key}' matches {matches:?}")]
    Ambiguous { key: String, matches: Vec<String> },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("invalid command, {0}")]
    Command(KeyError),
    #[error("missing list name, expected 'pending' or 'completed'")]
    MissingList,
    #[error("invalid list name, {0}")]
    List(KeyError),
    #[error("invalid position '{0}', expected a number starting at 1")]
    Position(String),
}

/// One parsed shell line. Positions are 1-based indexes into a list and
/// stand in for the user's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit {
        list: ListKind,
        position: Option<usize>,
        text: Option<String>,
    },
    Delete {
        list: ListKind,
        position: Option<usize>,
    },
    Complete {
        position: Option<usize>,
    },
    Reopen {
        position: Option<usize>,
    },
    List,
    Json,
    Help,
    Quit,
}

/// Resolves `key` against `candidates`: an exact match wins, otherwise a
/// unique prefix.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, KeyError> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(KeyError::Unknown(key.to_string())),
        _ => Err(KeyError::Ambiguous {
            key: key.to_string(),
            matches: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}

pub fn parse_list(key: &str) -> Result<ListKind, KeyError> {
    let full = expand_key(&key.to_lowercase(), &LISTS)?;
    Ok(if full == "pending" {
        ListKind::Pending
    } else {
        ListKind::Completed
    })
}

/// Parses one input line. Task text after `add` is taken verbatim; the
/// store decides whether it is acceptable.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (verb, rest) = split_word(line);
    if verb.is_empty() {
        return Err(CommandError::Empty);
    }
    let verb = expand_key(&verb.to_lowercase(), &COMMANDS).map_err(CommandError::Command)?;

    match verb.as_str() {
        "add" => Ok(Command::Add(rest.to_string())),
        "edit" => {
            let (list, rest) = take_list(rest)?;
            let (position, rest) = take_position(rest)?;
            let text = if rest.trim().is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            Ok(Command::Edit { list, position, text })
        }
        "delete" => {
            let (list, rest) = take_list(rest)?;
            let (position, _) = take_position(rest)?;
            Ok(Command::Delete { list, position })
        }
        "complete" => Ok(Command::Complete {
            position: take_position(rest)?.0,
        }),
        "reopen" => Ok(Command::Reopen {
            position: take_position(rest)?.0,
        }),
        "list" => Ok(Command::List),
        "json" => Ok(Command::Json),
        "help" => Ok(Command::Help),
        _ => Ok(Command::Quit),
    }
}

/// Splits off the first whitespace-delimited word. Exactly one separator
/// is consumed so the remainder keeps its own spacing.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => (&s[..i], &s[i + c.len_utf8()..]),
        None => (s, ""),
    }
}

fn take_list(s: &str) -> Result<(ListKind, &str), CommandError> {
    let (word, rest) = split_word(s);
    if word.is_empty() {
        return Err(CommandError::MissingList);
    }
    let list = parse_list(word).map_err(CommandError::List)?;
    Ok((list, rest))
}

fn take_position(s: &str) -> Result<(Option<usize>, &str), CommandError> {
    let (word, rest) = split_word(s);
    if word.is_empty() {
        return Ok((None, rest));
    }
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok((Some(n), rest)),
        _ => Err(CommandError::Position(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_expand_key() {
        let candidates = vec!["due", "project", "priority"];

        assert_eq!(expand_key("d", &candidates).unwrap(), "due");
        assert_eq!(expand_key("du", &candidates).unwrap(), "due");
        assert_eq!(expand_key("due", &candidates).unwrap(), "due");

        assert_eq!(expand_key("pro", &candidates).unwrap(), "project");
        assert_eq!(expand_key("pri", &candidates).unwrap(), "priority");

        // Ambiguous
        assert!(matches!(
            expand_key("pr", &candidates),
            Err(KeyError::Ambiguous { .. })
        ));

        // Unknown
        assert_eq!(
            expand_key("x", &candidates),
            Err(KeyError::Unknown("x".to_string()))
        );
    }

    #[test]
    fn test_every_command_has_a_one_letter_prefix() {
        for verb in COMMANDS {
            let first = &verb[..1];
            assert_eq!(expand_key(first, &COMMANDS).unwrap(), verb);
        }
    }

    #[test]
    fn test_add_keeps_text_verbatim() {
        assert_eq!(
            parse_command("add Buy milk").unwrap(),
            Command::Add("Buy milk".to_string())
        );
        assert_eq!(
            parse_command("a   spaced ").unwrap(),
            Command::Add("  spaced ".to_string())
        );
        assert_eq!(parse_command("add").unwrap(), Command::Add(String::new()));
    }

    #[test]
    fn test_edit_with_and_without_text() {
        assert_eq!(
            parse_command("edit p 2 Buy bread").unwrap(),
            Command::Edit {
                list: ListKind::Pending,
                position: Some(2),
                text: Some("Buy bread".to_string()),
            }
        );
        assert_eq!(
            parse_command("e completed 1").unwrap(),
            Command::Edit {
                list: ListKind::Completed,
                position: Some(1),
                text: None,
            }
        );
        assert_eq!(
            parse_command("edit c").unwrap(),
            Command::Edit {
                list: ListKind::Completed,
                position: None,
                text: None,
            }
        );
    }

    #[rstest]
    #[case("delete p 3", Command::Delete { list: ListKind::Pending, position: Some(3) })]
    #[case("del COMPLETED", Command::Delete { list: ListKind::Completed, position: None })]
    #[case("complete 1", Command::Complete { position: Some(1) })]
    #[case("reopen", Command::Reopen { position: None })]
    #[case("  list", Command::List)]
    #[case("j", Command::Json)]
    #[case("HELP", Command::Help)]
    #[case("q", Command::Quit)]
    fn test_parse(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse_command(line).unwrap(), expected);
    }

    #[rstest]
    #[case("", CommandError::Empty)]
    #[case("   ", CommandError::Empty)]
    #[case("frobnicate", CommandError::Command(KeyError::Unknown("frobnicate".to_string())))]
    #[case("edit", CommandError::MissingList)]
    #[case("delete x 1", CommandError::List(KeyError::Unknown("x".to_string())))]
    #[case("complete 0", CommandError::Position("0".to_string()))]
    #[case("reopen two", CommandError::Position("two".to_string()))]
    fn test_parse_errors(#[case] line: &str, #[case] expected: CommandError) {
        assert_eq!(parse_command(line), Err(expected));
    }
}
