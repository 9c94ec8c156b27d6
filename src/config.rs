use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Remote collection the list is loaded from and written back to.
pub const DEFAULT_API_URL: &str = "https://bookbase-mix2.onrender.com/api/books";
/// Third-party form endpoint that receives feedback submissions.
pub const DEFAULT_FEEDBACK_URL: &str = "https://formspree.io/f/xjkaljql";

/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".bookbase";
const LOG_FILE_NAME: &str = "bookbase.log";

const API_URL_VAR: &str = "BOOKBASE_API_URL";
const FEEDBACK_URL_VAR: &str = "BOOKBASE_FEEDBACK_URL";
const LOG_FILE_VAR: &str = "BOOKBASE_LOG_FILE";

/// Endpoint URLs and the log destination. Nothing here is persisted; the
/// environment only overrides the built-in defaults for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub feedback_url: String,
    pub log_file: PathBuf,
}

impl Config {
    /// Build a config pointing at explicit endpoints. Used by tests that run
    /// against a local mock server.
    pub fn new(api_url: &str, feedback_url: &str, log_file: PathBuf) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            feedback_url: feedback_url.to_string(),
            log_file,
        }
    }

    /// Defaults overlaid with `BOOKBASE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let feedback_url =
            env::var(FEEDBACK_URL_VAR).unwrap_or_else(|_| DEFAULT_FEEDBACK_URL.to_string());
        let log_file = match env::var_os(LOG_FILE_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_log_path()?,
        };
        Ok(Self::new(&api_url, &feedback_url, log_file))
    }
}

/// Resolve `~/.bookbase/bookbase.log`.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
