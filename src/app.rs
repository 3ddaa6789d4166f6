//! One run: staged diff → truncation → generation → review.

use thiserror::Error;
use tracing::debug;

use crate::config::{API_KEY_ENV_VAR, Config};
use crate::error::{GenerateError, GitError, ReviewError};
use crate::git::{GitRunner, StagedChanges, truncate_diff};
use crate::llm::{GenerationRequest, MessageGenerator};
use crate::output::Console;
use crate::review::{ReviewLoop, ReviewOutcome, Terminal, generate_message};

/// How a run finished without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Committed,
    /// The user quit the review.
    Aborted,
    /// Print-only mode wrote the message to stdout.
    Printed,
    /// The index was empty.
    NothingStaged,
}

impl RunStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Committed | RunStatus::Aborted | RunStatus::Printed => 0,
            RunStatus::NothingStaged => 1,
        }
    }
}

/// Failures that end a run with exit status 1.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("Failed to write the commit message: {0}")]
    Output(#[source] std::io::Error),
}

impl RunError {
    pub fn is_authentication(&self) -> bool {
        match self {
            RunError::Generate(GenerateError::Authentication) => true,
            RunError::Review(e) => e.is_authentication(),
            _ => false,
        }
    }

    /// Print the failure, with a remediation line for a rejected key.
    pub fn report(&self, console: &Console) {
        console.error(&self.to_string());
        if self.is_authentication() {
            console.info(&format!(
                "Run 'git-massage --setup' or set the {API_KEY_ENV_VAR} environment variable."
            ));
        }
    }
}

/// Execute a run with an already-resolved API key.
///
/// Nothing reaches the generator until the repository check and staged diff
/// have succeeded.
pub async fn run<R, G, T>(
    config: &Config,
    api_key: &str,
    console: &Console,
    git: &StagedChanges<R>,
    generator: &G,
    terminal: &T,
) -> Result<RunStatus, RunError>
where
    R: GitRunner,
    G: MessageGenerator + ?Sized,
    T: Terminal + ?Sized,
{
    let diff = git.staged_diff(&config.exclude_files)?;
    if diff.is_empty() {
        console.error("No staged changes found. Did you run 'git add'?");
        return Ok(RunStatus::NothingStaged);
    }

    let (diff, truncated) = truncate_diff(&diff, config.max_diff_chars);
    if truncated {
        console.warn("Diff is large, truncated for AI context.");
    }
    debug!("Diff ready: {} chars", diff.chars().count());

    if console.is_print_only() {
        let request = GenerationRequest {
            diff,
            model: config.model.clone(),
            api_key: api_key.to_string(),
            hint: None,
        };
        let message = generate_message(generator, console, &request).await?;
        console.emit_result(&message).map_err(RunError::Output)?;
        return Ok(RunStatus::Printed);
    }

    let mut review = ReviewLoop::new(
        generator,
        git,
        terminal,
        *console,
        diff,
        config.model.clone(),
        api_key.to_string(),
    );

    match review.run().await? {
        ReviewOutcome::Committed { .. } => Ok(RunStatus::Committed),
        ReviewOutcome::Aborted => Ok(RunStatus::Aborted),
    }
}
