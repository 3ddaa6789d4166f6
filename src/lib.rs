//! git-massage - write semantic commit messages for staged changes with OpenAI.
//!
//! # Overview
//!
//! git-massage reads the staged diff, drops noise such as deleted-file bodies,
//! trims it to a character budget, asks a chat model for a Conventional
//! Commits message, and lets the user commit, edit, regenerate with a hint,
//! or quit.

pub mod app;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod output;
pub mod review;
pub mod setup;

// Re-export commonly used types
pub use app::{RunError, RunStatus};
pub use config::Config;
pub use error::{ConfigError, GenerateError, GitError, ReviewError};
pub use git::{StagedChanges, SystemGit, filter_diff_noise, truncate_diff};
pub use llm::{GenerationRequest, MessageGenerator, OpenAiClient};
pub use output::Console;
pub use review::{ReviewAction, ReviewLoop, ReviewOutcome};
