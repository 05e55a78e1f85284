//! Task specification parsing
//!
//! Turns raw CLI tokens into [`Command`] descriptors. A token is either a plain
//! shell command (`ava --tap`), a named task (`lint::xo`), or a quoted command
//! (`"yarn run::tests"`) whose quotes stop the `::` from being read as a name
//! separator.

use crate::types::{ListrError, ListrResult};

/// Separator between a task title and its command.
///
/// A single `:` shows up in real commands (`yarn run:tests`), so only the
/// doubled form names a task.
pub const TITLE_SEPARATOR: &str = "::";

/// One resolved task to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Display label, defaults to `command_name` for unnamed tasks
    pub task_title: String,
    /// Full shell command text, passed verbatim to the shell
    pub command: String,
    /// Leading token of `command`, used for "not found" detection
    pub command_name: String,
}

/// Parse CLI input into tasks.
///
/// ```
/// use listr_core::configs::tasks::parse_commands;
///
/// let commands = parse_commands(["lint::xo", "ava --tap", "'yarn run::tests'"]);
///
/// assert_eq!(commands[0].task_title, "lint");
/// assert_eq!(commands[0].command, "xo");
/// assert_eq!(commands[1].task_title, "ava");
/// assert_eq!(commands[2].command, "yarn run::tests");
/// ```
pub fn parse_commands<I, S>(input: I) -> Vec<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    input
        .into_iter()
        .map(|raw| parse_command(raw.as_ref()))
        .collect()
}

/// Parse a single raw task token
pub fn parse_command(raw: &str) -> Command {
    parse_named_command(raw).unwrap_or_else(|| parse_unnamed_command(raw))
}

/// Match `title::command`, returning `None` for quoted or unnamed tokens.
///
/// The title may not contain `:` or quote characters; the command is
/// everything after the first separator and may contain more of them.
pub fn parse_named_command(raw: &str) -> Option<Command> {
    if surrounding_quote(raw).is_some() {
        return None;
    }

    let (title, command) = raw.split_once(TITLE_SEPARATOR)?;
    if title.contains([':', '"', '\'']) {
        return None;
    }

    Some(Command {
        task_title: title.to_string(),
        command: command.to_string(),
        command_name: first_token(command).to_string(),
    })
}

/// Treat a token as a plain command, stripping one pair of enclosing quotes
pub fn parse_unnamed_command(raw: &str) -> Command {
    let (command, command_name) = match surrounding_quote(raw) {
        Some(_) => {
            let command = &raw[1..raw.len() - 1];
            (command, quoted_command_name(command))
        }
        None => (raw, first_token(raw)),
    };

    Command {
        task_title: command_name.to_string(),
        command: command.to_string(),
        command_name: command_name.to_string(),
    }
}

/// Reject tasks that would hand the shell an empty command.
///
/// A command with any non-blank text always has a non-empty `command_name`.
pub fn validate_commands(raw: &[String], commands: &[Command]) -> ListrResult<()> {
    for (raw, command) in raw.iter().zip(commands) {
        if command.command_name.is_empty() {
            return Err(ListrError::EmptyCommand { raw: raw.clone() });
        }
    }
    Ok(())
}

/// The quote character wrapping the whole token, if any
fn surrounding_quote(raw: &str) -> Option<char> {
    ['"', '\''].into_iter().find(|&quote| {
        raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote)
    })
}

/// First whitespace-delimited token, empty only for blank commands
fn first_token(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or_default()
}

/// Label for a task whose quotes kept it from being named.
///
/// Stopping at `::` keeps a quoted `lint::xo` labelled `lint` while its
/// command text stays intact.
fn quoted_command_name(command: &str) -> &str {
    let token = first_token(command);
    match token.split_once(TITLE_SEPARATOR) {
        Some((head, _)) if !head.is_empty() => head,
        _ => token,
    }
}
