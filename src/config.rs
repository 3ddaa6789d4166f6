//! User configuration: `~/.config/git-massage/config.toml` plus env overrides.
//!
//! Precedence, lowest to highest: built-in defaults, the config file,
//! environment variables, command-line flags.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use toml_edit::DocumentMut;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::git::DEFAULT_MAX_DIFF_CHARS;

pub const APP_NAME: &str = "git-massage";

/// Model used when neither the file nor the environment names one.
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Model offered as the default answer in the setup wizard.
pub const SETUP_DEFAULT_MODEL: &str = "gpt-4o";

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_ENV_VAR: &str = "GIT_MASSAGE_MODEL";

pub const KEY_MODEL: &str = "model";
pub const KEY_API_KEY: &str = "openai_api_key";
pub const KEY_EXCLUDE_FILES: &str = "exclude_files";
pub const KEY_MAX_DIFF_CHARS: &str = "max_diff_chars";

/// Paths left out of the diff unless the config file says otherwise.
/// Lock files and generated bundles are large and rarely explain a change.
pub const DEFAULT_EXCLUDE_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "Cargo.lock",
    "poetry.lock",
    "uv.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
    "*.min.js",
    "*.min.css",
];

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model: String,
    pub openai_api_key: Option<String>,
    pub exclude_files: Vec<String>,
    pub max_diff_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            openai_api_key: None,
            exclude_files: DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
        }
    }
}

/// Location of the config file: `~/.config/git-massage/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join(APP_NAME).join("config.toml"))
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Self {
        match config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("{}; using default configuration", e);
                let mut config = Self::default();
                config.apply_env();
                config
            }
        }
    }

    /// Load from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// logged and ignored rather than aborting the run.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::default();

        match read_document(path) {
            Ok(Some(doc)) => config.apply_document(&doc),
            Ok(None) => debug!("No config file at {}", path.display()),
            Err(e) => warn!("{}; using default configuration", e),
        }

        config.apply_env();
        config
    }

    /// Apply command-line overrides; `None` keeps the loaded value.
    pub fn with_overrides(mut self, model: Option<String>, api_key: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(key) = api_key {
            self.openai_api_key = Some(key);
        }
        self
    }

    fn apply_document(&mut self, doc: &DocumentMut) {
        if let Some(model) = doc.get(KEY_MODEL).and_then(|v| v.as_str()) {
            self.model = model.to_string();
        }

        if let Some(key) = doc.get(KEY_API_KEY).and_then(|v| v.as_str()) {
            if !key.is_empty() {
                self.openai_api_key = Some(key.to_string());
            }
        }

        if let Some(patterns) = doc.get(KEY_EXCLUDE_FILES).and_then(|v| v.as_array()) {
            self.exclude_files = patterns
                .iter()
                .filter_map(|p| p.as_str())
                .map(str::to_string)
                .collect();
        }

        if let Some(n) = doc.get(KEY_MAX_DIFF_CHARS).and_then(|v| v.as_integer()) {
            match usize::try_from(n) {
                Ok(n) if n > 0 => self.max_diff_chars = n,
                _ => warn!(
                    "Ignoring invalid {} value {}, using {}",
                    KEY_MAX_DIFF_CHARS, n, self.max_diff_chars
                ),
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(key) = env::var(API_KEY_ENV_VAR) {
            if !key.is_empty() {
                self.openai_api_key = Some(key);
            }
        }

        if let Ok(model) = env::var(MODEL_ENV_VAR) {
            if !model.is_empty() {
                self.model = model;
            }
        }
    }
}

/// Persist one top-level key, keeping the rest of the file as written.
///
/// Creates the file and its parent directory if needed. The new content is
/// written to a temporary file and renamed over the old one.
pub fn save_value(
    path: &Path,
    key: &str,
    value: impl Into<toml_edit::Value>,
) -> Result<(), ConfigError> {
    let mut doc = match read_document(path)? {
        Some(doc) => doc,
        None => DocumentMut::new(),
    };
    doc[key] = toml_edit::value(value);

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let write_err = |source: std::io::Error| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(doc.to_string().as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Saved {} to {}", key, path.display());
    Ok(())
}

fn read_document(path: &Path) -> Result<Option<DocumentMut>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    content
        .parse::<DocumentMut>()
        .map(Some)
        .map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
