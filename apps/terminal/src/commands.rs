//! Parsing of interactive input lines and resolution of ban targets.

use shared::domain::{Dog, Lifespan, Origin, Size};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the attribute chips or the ban list.
    Index(usize),
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Discover,
    Ban(Target),
    Unban(Target),
    Show,
    History,
    Bans,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs a chip number or a value")]
    MissingTarget(&'static str),
}

pub const HELP: &str = "\
commands:
  discover | d | <enter>   fetch a dog that matches none of the banned values
  ban <n|value>            ban chip n of the current dog, or any value
  unban <n|value>          remove entry n of the ban list, or a value
  show                     redraw all panels
  history                  show the gallery of seen dogs
  bans                     show the ban list
  help                     this text
  quit | exit              leave";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" | "d" | "discover" => Ok(Command::Discover),
        "ban" => parse_target(rest)
            .map(Command::Ban)
            .ok_or(CommandError::MissingTarget("ban")),
        "unban" => parse_target(rest)
            .map(Command::Unban)
            .ok_or(CommandError::MissingTarget("unban")),
        "show" => Ok(Command::Show),
        "history" | "gallery" => Ok(Command::History),
        "bans" => Ok(Command::Bans),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}

fn parse_target(raw: &str) -> Option<Target> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(index) if index > 0 => Some(Target::Index(index)),
        _ => Some(Target::Value(raw.to_string())),
    }
}

/// Chip numbers pick from the current dog. Typed values are matched
/// case-insensitively against the current dog and every size, origin and
/// lifespan label, so `large` bans `Large` whatever dog is on screen.
pub fn resolve_ban_target(target: &Target, current: Option<&Dog>) -> Option<String> {
    match target {
        Target::Index(index) => current?
            .attribute_values()
            .get(index.checked_sub(1)?)
            .map(|value| value.to_string()),
        Target::Value(value) => Some(
            current
                .and_then(|dog| find_label(dog.attribute_values(), value))
                .or_else(|| find_label(known_labels(), value))
                .unwrap_or_else(|| value.clone()),
        ),
    }
}

fn find_label<'a>(candidates: impl IntoIterator<Item = &'a str>, value: &str) -> Option<String> {
    candidates
        .into_iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(value))
        .map(str::to_string)
}

fn known_labels() -> impl Iterator<Item = &'static str> {
    Size::ALL
        .iter()
        .map(|size| size.label())
        .chain(Origin::ALL.iter().map(|origin| origin.label()))
        .chain(Lifespan::ALL.iter().map(|lifespan| lifespan.label()))
}

pub fn resolve_unban_target(target: &Target, banned: &[String]) -> Option<String> {
    match target {
        Target::Index(index) => banned.get(index.checked_sub(1)?).cloned(),
        Target::Value(value) => Some(
            banned
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(value))
                .cloned()
                .unwrap_or_else(|| value.clone()),
        ),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
