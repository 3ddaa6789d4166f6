//! User input for the review loop.

use std::io;
use std::str::FromStr;

use dialoguer::{Editor, Input};
use thiserror::Error;

/// What the user chose to do with a candidate message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Commit,
    Edit,
    Regenerate,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Please choose one of: c, e, r, q")]
pub struct ParseActionError;

impl FromStr for ReviewAction {
    type Err = ParseActionError;

    /// Accepts the single letter or the full word, any case. Blank means commit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "c" | "commit" => Ok(ReviewAction::Commit),
            "e" | "edit" => Ok(ReviewAction::Edit),
            "r" | "regenerate" => Ok(ReviewAction::Regenerate),
            "q" | "quit" => Ok(ReviewAction::Quit),
            _ => Err(ParseActionError),
        }
    }
}

/// Blocking prompts the review loop needs from the user.
#[cfg_attr(test, mockall::automock)]
pub trait Terminal {
    /// Ask for the next action. Blank input is [`ReviewAction::Commit`].
    fn choose_action(&self) -> io::Result<ReviewAction>;

    /// Ask for optional regeneration guidance; `""` when skipped.
    fn ask_hint(&self) -> io::Result<String>;

    /// Open `message` in the user's editor.
    ///
    /// Returns `None` when the editor was closed without saving.
    fn edit(&self, message: &str) -> io::Result<Option<String>>;
}

/// [`Terminal`] backed by dialoguer prompts and `$VISUAL`/`$EDITOR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerTerminal;

impl Terminal for DialoguerTerminal {
    fn choose_action(&self) -> io::Result<ReviewAction> {
        let answer: String = Input::new()
            .with_prompt("Action [c]ommit, [e]dit, [r]egenerate, [q]uit")
            .default("c".to_string())
            .show_default(false)
            .validate_with(|input: &String| -> Result<(), ParseActionError> {
                input.parse::<ReviewAction>().map(|_| ())
            })
            .interact_text()
            .map_err(io::Error::other)?;

        answer.parse().map_err(io::Error::other)
    }

    fn ask_hint(&self) -> io::Result<String> {
        let hint: String = Input::new()
            .with_prompt("Add guidance for regeneration? (press Enter to skip)")
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;

        Ok(hint.trim().to_string())
    }

    fn edit(&self, message: &str) -> io::Result<Option<String>> {
        Editor::new().edit(message).map_err(io::Error::other)
    }
}
