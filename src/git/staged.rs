//! Staged diff collection and commit creation.

use tracing::debug;

use crate::error::GitError;
use crate::git::filter::filter_diff_noise;
use crate::git::runner::{GitRunner, SystemGit, args};

/// Creates a commit from the staged index.
#[cfg_attr(test, mockall::automock)]
pub trait Committer {
    fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// Staged-change operations on top of a [`GitRunner`].
pub struct StagedChanges<R = SystemGit> {
    runner: R,
}

impl<R: GitRunner> StagedChanges<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Collect the filtered diff of everything in the index.
    ///
    /// Returns an empty string when nothing is staged, without asking git for
    /// the diff. Each exclusion is passed as an `:(exclude)` pathspec; patterns
    /// that match no staged file have no effect.
    pub fn staged_diff(&self, exclusions: &[String]) -> Result<String, GitError> {
        self.ensure_work_tree()?;

        let staged = self.staged_files()?;
        if staged.is_empty() {
            debug!("Index is empty, skipping diff");
            return Ok(String::new());
        }
        debug!("{} staged file(s)", staged.len());

        let mut cmd = args(&["diff", "--cached"]);
        cmd.extend(exclusions.iter().map(|pattern| format!(":(exclude){pattern}")));

        let raw = self.runner.run(&cmd)?;
        Ok(filter_diff_noise(&raw))
    }

    /// Paths currently staged for commit.
    pub fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let output = self.runner.run(&args(&["diff", "--cached", "--name-only"]))?;
        Ok(output
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn ensure_work_tree(&self) -> Result<(), GitError> {
        match self.runner.run(&args(&["rev-parse", "--is-inside-work-tree"])) {
            Ok(_) => Ok(()),
            Err(GitError::ToolNotFound) => Err(GitError::ToolNotFound),
            Err(e) => {
                debug!("Work tree check failed: {}", e);
                Err(GitError::NotARepository)
            }
        }
    }
}

impl<R: GitRunner> Committer for StagedChanges<R> {
    fn commit(&self, message: &str) -> Result<(), GitError> {
        let cmd = args(&["commit", "-m", message]);
        self.runner.run(&cmd).map(|_| ()).map_err(|e| match e {
            GitError::CommandFailed { stderr } => GitError::CommandFailed {
                stderr: format!("Failed to commit: {stderr}"),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::MockGitRunner;
    use mockall::Sequence;

    fn expect_work_tree(mock: &mut MockGitRunner, seq: &mut Sequence) {
        mock.expect_run()
            .withf(|a| a.join(" ") == "rev-parse --is-inside-work-tree")
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok("true".to_string()));
    }

    #[test]
    fn test_empty_index_skips_diff_command() {
        let mut mock = MockGitRunner::new();
        let mut seq = Sequence::new();
        expect_work_tree(&mut mock, &mut seq);
        mock.expect_run()
            .withf(|a| a.join(" ") == "diff --cached --name-only")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(String::new()));

        let staged = StagedChanges::new(mock);
        assert_eq!(staged.staged_diff(&["Cargo.lock".to_string()]).unwrap(), "");
    }

    #[test]
    fn test_exclusions_become_pathspecs() {
        let mut mock = MockGitRunner::new();
        let mut seq = Sequence::new();
        expect_work_tree(&mut mock, &mut seq);
        mock.expect_run()
            .withf(|a| a.join(" ") == "diff --cached --name-only")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("src/main.rs\nCargo.lock".to_string()));
        mock.expect_run()
            .withf(|a| {
                a.join(" ") == "diff --cached :(exclude)Cargo.lock :(exclude)*.min.js"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("diff --git a/src/main.rs b/src/main.rs\n+fn main() {}".to_string()));

        let staged = StagedChanges::new(mock);
        let diff = staged
            .staged_diff(&["Cargo.lock".to_string(), "*.min.js".to_string()])
            .unwrap();
        assert_eq!(diff, "diff --git a/src/main.rs b/src/main.rs\n+fn main() {}");
    }

    #[test]
    fn test_raw_diff_is_filtered() {
        let mut mock = MockGitRunner::new();
        mock.expect_run()
            .withf(|a| a[0] == "rev-parse")
            .returning(|_| Ok("true".to_string()));
        mock.expect_run()
            .withf(|a| a.join(" ") == "diff --cached --name-only")
            .returning(|_| Ok("gone.txt".to_string()));
        mock.expect_run()
            .withf(|a| a.join(" ") == "diff --cached")
            .returning(|_| {
                Ok("diff --git a/gone.txt b/gone.txt\ndeleted file mode 100644\n-bye".to_string())
            });

        let diff = StagedChanges::new(mock).staged_diff(&[]).unwrap();
        assert_eq!(
            diff,
            "diff --git a/gone.txt b/gone.txt\ndeleted file mode (content omitted)"
        );
    }

    #[test]
    fn test_failed_work_tree_check_is_not_a_repository() {
        let mut mock = MockGitRunner::new();
        mock.expect_run().times(1).returning(|_| {
            Err(GitError::CommandFailed {
                stderr: "fatal: not a git repository".to_string(),
            })
        });

        let result = StagedChanges::new(mock).staged_diff(&[]);
        assert!(matches!(result, Err(GitError::NotARepository)));
    }

    #[test]
    fn test_missing_git_is_reported_as_such() {
        let mut mock = MockGitRunner::new();
        mock.expect_run()
            .times(1)
            .returning(|_| Err(GitError::ToolNotFound));

        let result = StagedChanges::new(mock).staged_diff(&[]);
        assert!(matches!(result, Err(GitError::ToolNotFound)));
    }

    #[test]
    fn test_commit_passes_message() {
        let mut mock = MockGitRunner::new();
        mock.expect_run()
            .withf(|a| a.len() == 3 && a[0] == "commit" && a[1] == "-m" && a[2] == "feat: add x")
            .times(1)
            .returning(|_| Ok(String::new()));

        StagedChanges::new(mock).commit("feat: add x").unwrap();
    }

    #[test]
    fn test_commit_failure_is_prefixed() {
        let mut mock = MockGitRunner::new();
        mock.expect_run().returning(|_| {
            Err(GitError::CommandFailed {
                stderr: "nothing to commit".to_string(),
            })
        });

        let err = StagedChanges::new(mock).commit("chore: x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Git command failed: Failed to commit: nothing to commit"
        );
    }
}
