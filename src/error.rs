//! Error types for git-massage modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git invocations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git is not installed or not in PATH.")]
    ToolNotFound,

    #[error("Git command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Not a git repository.")]
    NotARepository,

    #[error("Unexpected error running git: {0}")]
    Unexpected(String),
}

/// Errors from the commit message generation service.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid API Key. Please check your configuration.")]
    Authentication,

    #[error("Error generating message: {0}")]
    Failed(String),

    #[error("Error generating message: request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Error generating message: the model returned no content")]
    EmptyResponse,
}

/// Errors from loading or saving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end the interactive review loop.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Terminal interaction failed: {0}")]
    Terminal(#[source] std::io::Error),
}

impl ReviewError {
    /// Whether this failure was a rejected API key.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ReviewError::Generate(GenerateError::Authentication))
    }
}
