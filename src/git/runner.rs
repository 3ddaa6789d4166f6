//! Spawning the system `git` binary.
//!
//! Every git operation shells out to `git` rather than linking libgit2, so the
//! user's own config, hooks, and credential helpers apply to the commit.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Runs git with a list of arguments and returns its stdout.
#[cfg_attr(test, mockall::automock)]
pub trait GitRunner {
    /// Run `git <args>`.
    ///
    /// Returns stdout with trailing whitespace trimmed. A non-zero exit becomes
    /// [`GitError::CommandFailed`] carrying the trimmed stderr.
    fn run(&self, args: &[String]) -> Result<String, GitError>;
}

/// [`GitRunner`] backed by a real child process.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, OsString)>,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemGit {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a different executable name, resolved through `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Run every command inside `dir` instead of the process working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for every command, e.g. `GIT_CEILING_DIRECTORIES`.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        if which::which(&self.program).is_err() {
            return Err(GitError::ToolNotFound);
        }

        debug!("Running {} {}", self.program, args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => GitError::ToolNotFound,
            _ => GitError::Unexpected(e.to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(
                "git exited with {:?}: {}",
                output.status.code(),
                stderr
            );
            return Err(GitError::CommandFailed { stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

/// Convert borrowed arguments into the owned form [`GitRunner::run`] takes.
pub(crate) fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
