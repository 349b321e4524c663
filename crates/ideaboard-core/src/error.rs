//! Error taxonomy shared by every stage of a sync run

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Malformed document: missing markers, markers out of order, bad list items.
    #[error("format error: {0}")]
    Format(String),

    #[error("unsupported repo host: {url}")]
    UnsupportedHost { url: String },

    #[error("invalid repo URL {url}: {reason}")]
    InvalidRepoUrl { url: String, reason: String },

    #[error("repo not found: {url}")]
    RepoNotFound { url: String },

    /// Any other network or API failure.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid state file: {0}")]
    State(#[from] serde_json::Error),
}

impl SyncError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
