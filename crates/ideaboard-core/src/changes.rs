//! "Latest changes" digest

use crate::fetch::FetchResult;
use crate::project::Project;
use crate::table::format_date;

pub const NO_CHANGES_LINE: &str = "- No changes since last run.";
pub const DEFAULT_COMMIT_MESSAGE: &str = "New commit";

/// Change line for a project whose latest commit differs from the one seen
/// last run. `None` when there is no commit or it was already seen.
pub fn change_line(
    project: &Project,
    fetched: &FetchResult,
    previous_sha: Option<&str>,
) -> Option<String> {
    let commit = fetched.latest_commit.as_ref()?;
    if previous_sha == Some(commit.sha.as_str()) {
        return None;
    }

    let message = commit
        .message
        .as_deref()
        .and_then(|m| m.lines().next())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_COMMIT_MESSAGE);

    Some(format!(
        "- {}: {} ({}, {})",
        project.name,
        message,
        commit.short_sha(),
        format_date(commit.committed_at.as_ref())
    ))
}

/// Lines for the digest region; never empty.
pub fn digest(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![NO_CHANGES_LINE.to_string()]
    } else {
        lines
    }
}
