//! Line-editor support: command and argument completion, inline hints and
//! prompt highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use parley_core::contact::Contact;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hint, Hinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;

/// Commands whose first argument is a file on disk.
const PATH_COMMANDS: &[&str] = &["/avatar", "/image"];

/// Inline hint shown after the cursor.
///
/// Only the tail of a command name is accepted on right-arrow; argument
/// synopses are display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHint {
    display: String,
    accept: bool,
}

impl Hint for CommandHint {
    fn display(&self) -> &str {
        &self.display
    }

    fn completion(&self) -> Option<&str> {
        self.accept.then_some(self.display.as_str())
    }
}

pub struct CliHelper {
    contacts: Vec<(String, String)>,
    files: FilenameCompleter,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            files: FilenameCompleter::new(),
        }
    }

    /// Replaces the contact ids offered after `/select`.
    pub fn set_contacts(&mut self, contacts: &[Contact]) {
        self.contacts = contacts
            .iter()
            .map(|c| (c.id.clone(), c.display_name().to_string()))
            .collect();
    }

    /// Completes command names and `/select` targets. Path arguments are
    /// handled by the filename completer in [`Completer::complete`].
    fn complete_words(&self, line: &str) -> (usize, Vec<Pair>) {
        match line.split_once(' ') {
            None if line.starts_with('/') => {
                let candidates = COMMANDS
                    .iter()
                    .filter(|(name, _, _)| name.starts_with(line))
                    .map(|(name, synopsis, _)| Pair {
                        display: name.to_string(),
                        replacement: if synopsis.is_empty() {
                            name.to_string()
                        } else {
                            format!("{name} ")
                        },
                    })
                    .collect();
                (0, candidates)
            }
            Some(("/select", target)) if !target.contains(' ') => {
                let candidates = self
                    .contacts
                    .iter()
                    .filter(|(id, _)| id.starts_with(target))
                    .map(|(id, name)| Pair {
                        display: format!("{id} ({name})"),
                        replacement: id.clone(),
                    })
                    .collect();
                (line.len() - target.len(), candidates)
            }
            _ => (0, Vec::new()),
        }
    }

    fn hint_for(&self, line: &str) -> Option<CommandHint> {
        if !line.starts_with('/') {
            return None;
        }
        match line.split_once(' ') {
            None => COMMANDS
                .iter()
                .find(|(name, _, _)| name.starts_with(line) && name.len() > line.len())
                .map(|(name, _, _)| CommandHint {
                    display: name[line.len()..].to_string(),
                    accept: true,
                }),
            Some((name, "")) => COMMANDS
                .iter()
                .find(|(command, synopsis, _)| *command == name && !synopsis.is_empty())
                .map(|(_, synopsis, _)| CommandHint {
                    display: synopsis.to_string(),
                    accept: false,
                }),
            Some(_) => None,
        }
    }
}

impl Default for CliHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        if let Some((name, arg)) = head.split_once(' ') {
            if PATH_COMMANDS.contains(&name) && !arg.contains(' ') {
                return self.files.complete_path(line, pos);
            }
        }
        Ok(self.complete_words(head))
    }
}

impl Hinter for CliHelper {
    type Hint = CommandHint;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<CommandHint> {
        if pos < line.len() {
            return None;
        }
        self.hint_for(line)
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        match line.split_once(' ') {
            Some((name, rest)) => Owned(format!("{} {}", name.bright_cyan(), rest)),
            None => Owned(line.bright_cyan().to_string()),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Validator for CliHelper {}
