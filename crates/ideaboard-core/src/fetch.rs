//! Repository facts and the seam through which they are fetched

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::project::Project;
use crate::status::{compute_status_at, StatusLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    GitHub,
    GitLab,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("github"),
            Self::GitLab => f.write_str("gitlab"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestCommit {
    pub sha: String,
    pub message: Option<String>,
    pub committed_at: Option<DateTime<FixedOffset>>,
}

impl LatestCommit {
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }
}

/// First seven characters of a commit hash.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

/// Everything a run needs to know about one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub provider: Provider,
    pub default_branch: String,
    pub archived: bool,
    pub latest_commit: Option<LatestCommit>,
    pub has_release: bool,
}

impl FetchResult {
    pub fn latest_sha(&self) -> Option<&str> {
        self.latest_commit.as_ref().map(|c| c.sha.as_str())
    }

    pub fn latest_date(&self) -> Option<&DateTime<FixedOffset>> {
        self.latest_commit
            .as_ref()
            .and_then(|c| c.committed_at.as_ref())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> StatusLabel {
        compute_status_at(self.has_release, self.archived, self.latest_date(), now)
    }
}

/// Source of repository facts.
///
/// The real implementation talks to GitHub and GitLab; tests plug in a
/// static table.
pub trait RepoSource {
    fn fetch(&self, project: &Project) -> Result<FetchResult>;
}

impl<T: RepoSource + ?Sized> RepoSource for &T {
    fn fetch(&self, project: &Project) -> Result<FetchResult> {
        (**self).fetch(project)
    }
}
