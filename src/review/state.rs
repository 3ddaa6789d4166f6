//! The generate → present → act state machine.

use tracing::debug;

use crate::error::ReviewError;
use crate::git::Committer;
use crate::llm::{GenerationRequest, MessageGenerator};
use crate::output::Console;

use super::generate_message;
use super::terminal::{ReviewAction, Terminal};

/// Non-terminal states of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Presenting,
    Editing,
    Regenerating,
}

/// How a review ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The message was committed.
    Committed { message: String },
    /// The user quit; nothing was committed.
    Aborted,
}

/// Result of one [`ReviewLoop::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Next(Phase),
    Done(ReviewOutcome),
}

/// Data carried between iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewState {
    /// Candidate message, replaced by each generation or successful edit.
    pub message: String,
    /// Guidance sent with every generation until cleared.
    pub hint: Option<String>,
}

/// Drives one review session over injected collaborators.
pub struct ReviewLoop<'a, G: ?Sized, C: ?Sized, T: ?Sized> {
    generator: &'a G,
    committer: &'a C,
    terminal: &'a T,
    console: Console,
    diff: String,
    model: String,
    api_key: String,
    state: ReviewState,
}

impl<'a, G, C, T> ReviewLoop<'a, G, C, T>
where
    G: MessageGenerator + ?Sized,
    C: Committer + ?Sized,
    T: Terminal + ?Sized,
{
    pub fn new(
        generator: &'a G,
        committer: &'a C,
        terminal: &'a T,
        console: Console,
        diff: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            generator,
            committer,
            terminal,
            console,
            diff,
            model,
            api_key,
            state: ReviewState::default(),
        }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Run from [`Phase::Generating`] until the loop reaches a terminal state.
    pub async fn run(&mut self) -> Result<ReviewOutcome, ReviewError> {
        let mut phase = Phase::Generating;
        loop {
            match self.step(phase).await? {
                Transition::Next(next) => phase = next,
                Transition::Done(outcome) => return Ok(outcome),
            }
        }
    }

    /// Perform the work of `phase` and report where to go next.
    ///
    /// `Generating` makes exactly one generation call. `Presenting` makes at
    /// most one commit attempt. Errors end the review.
    pub async fn step(&mut self, phase: Phase) -> Result<Transition, ReviewError> {
        debug!("Review step: {:?}", phase);

        match phase {
            Phase::Generating => {
                let request = self.request();
                self.state.message =
                    generate_message(self.generator, &self.console, &request).await?;
                Ok(Transition::Next(Phase::Presenting))
            }
            Phase::Presenting => self.present(),
            Phase::Editing => self.edit(),
            Phase::Regenerating => self.regenerate(),
        }
    }

    fn request(&self) -> GenerationRequest {
        GenerationRequest {
            diff: self.diff.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            hint: self.state.hint.clone(),
        }
    }

    fn present(&mut self) -> Result<Transition, ReviewError> {
        self.console.message(&self.state.message);

        let action = self
            .terminal
            .choose_action()
            .map_err(ReviewError::Terminal)?;

        match action {
            ReviewAction::Commit => {
                self.committer.commit(&self.state.message)?;
                self.console.success("Committed successfully!");
                Ok(Transition::Done(ReviewOutcome::Committed {
                    message: self.state.message.clone(),
                }))
            }
            ReviewAction::Edit => Ok(Transition::Next(Phase::Editing)),
            ReviewAction::Regenerate => Ok(Transition::Next(Phase::Regenerating)),
            ReviewAction::Quit => {
                self.console.info("Aborted.");
                Ok(Transition::Done(ReviewOutcome::Aborted))
            }
        }
    }

    fn edit(&mut self) -> Result<Transition, ReviewError> {
        let edited = self
            .terminal
            .edit(&self.state.message)
            .map_err(ReviewError::Terminal)?;

        match edited.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => self.state.message = text.to_string(),
            _ => self.console.info("Edit cancelled (empty message)."),
        }

        Ok(Transition::Next(Phase::Presenting))
    }

    fn regenerate(&mut self) -> Result<Transition, ReviewError> {
        let hint = self.terminal.ask_hint().map_err(ReviewError::Terminal)?;
        self.state.hint = if hint.trim().is_empty() {
            None
        } else {
            Some(hint)
        };

        Ok(Transition::Next(Phase::Generating))
    }
}
