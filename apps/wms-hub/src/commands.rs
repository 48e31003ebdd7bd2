//! # Commands
//!
//! One line at the prompt is one user event.
//!
//! ```text
//!   "go inventory" │ "inventory" ──► Command::Go(Page::Inventory)
//!   "set name Basmati Rice"      ──► Command::Set { field: "name", value: "Basmati Rice" }
//!   "set amount"                 ──► Command::Set { field: "amount", value: "" }
//!   ""                           ──► None
//! ```

use crate::error::{AppError, AppResult};
use crate::shell::Page;

pub const HELP: &str = "\
Commands:
  go <page>            switch page (dashboard, customers, warehouses, commodities, inventory)
  <page>               same as go <page>
  start                open inventory from the dashboard
  add                  open the add form
  edit <id>            open the edit form for a record
  set <field> [value]  change a form field (empty value clears it)
  submit               validate and save the form
  cancel               close the form
  delete <id>          delete a record (asks for confirmation)
  reload               fetch the list again
  help                 show this help
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Page),
    Start,
    Add,
    Edit(String),
    Set { field: String, value: String },
    Submit,
    Cancel,
    Delete(String),
    Reload,
    Help,
    Quit,
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn single_arg(rest: &str, usage: &str) -> AppResult<String> {
    let (arg, extra) = split_word(rest);
    if arg.is_empty() || !extra.is_empty() {
        return Err(AppError::Usage(usage.to_string()));
    }
    Ok(arg.to_string())
}

fn no_args(command: Command, rest: &str, usage: &str) -> AppResult<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(AppError::Usage(usage.to_string()))
    }
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "go" => Command::Go(single_arg(rest, "go <page>")?.parse()?),
            "start" => no_args(Command::Start, rest, "start")?,
            "add" => no_args(Command::Add, rest, "add")?,
            "edit" => Command::Edit(single_arg(rest, "edit <id>")?),
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(AppError::Usage("set <field> [value]".to_string()));
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "submit" | "save" => no_args(Command::Submit, rest, "submit")?,
            "cancel" | "close" => no_args(Command::Cancel, rest, "cancel")?,
            "delete" => Command::Delete(single_arg(rest, "delete <id>")?),
            "reload" | "refresh" => no_args(Command::Reload, rest, "reload")?,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => match Page::from_name(other) {
                Some(page) if rest.is_empty() => Command::Go(page),
                _ => return Err(AppError::UnknownCommand(word.to_string())),
            },
        };
        Ok(Some(command))
    }
}
