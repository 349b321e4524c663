use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commits within this many whole days of now count as work in progress.
pub const RECENT_DAYS_WIP: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    NotStarted,
    Wip,
    Finished,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Wip => "wip",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a status from repository facts, measured against the current time.
pub fn compute_status<Tz: TimeZone>(
    has_release: bool,
    archived: bool,
    last_commit: Option<&DateTime<Tz>>,
) -> StatusLabel {
    compute_status_at(has_release, archived, last_commit, Utc::now())
}

/// Same as [`compute_status`] with an explicit "now".
///
/// Archival or any release wins over recency; a missing commit means not
/// started.
pub fn compute_status_at<Tz: TimeZone>(
    has_release: bool,
    archived: bool,
    last_commit: Option<&DateTime<Tz>>,
    now: DateTime<Utc>,
) -> StatusLabel {
    if archived || has_release {
        return StatusLabel::Finished;
    }

    let Some(last_commit) = last_commit else {
        return StatusLabel::NotStarted;
    };

    let elapsed = now.signed_duration_since(last_commit.with_timezone(&Utc));
    if elapsed.num_days() <= RECENT_DAYS_WIP {
        StatusLabel::Wip
    } else {
        StatusLabel::NotStarted
    }
}
