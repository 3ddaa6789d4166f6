//! Git operations via the system `git` binary.

pub mod filter;
pub mod runner;
pub mod staged;
pub mod truncate;

pub use filter::filter_diff_noise;
pub use runner::{GitRunner, SystemGit};
pub use staged::{Committer, StagedChanges};
pub use truncate::{DEFAULT_MAX_DIFF_CHARS, TRUNCATION_MARKER, truncate_diff};
