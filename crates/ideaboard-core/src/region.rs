//! Marker-delimited regions of a text document
//!
//! A region is the span of lines strictly between two exact literal marker
//! lines. Only the first occurrence of each marker is considered.

use crate::error::{Result, SyncError};

pub const PROJECT_LIST_START: &str = "<!-- PROJECT_LIST_START -->";
pub const PROJECT_LIST_END: &str = "<!-- PROJECT_LIST_END -->";
pub const PROJECT_TABLE_START: &str = "<!-- PROJECT_TABLE_START -->";
pub const PROJECT_TABLE_END: &str = "<!-- PROJECT_TABLE_END -->";
pub const LATEST_CHANGES_START: &str = "<!-- LATEST_CHANGES_START -->";
pub const LATEST_CHANGES_END: &str = "<!-- LATEST_CHANGES_END -->";

/// A start/end marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

impl Markers {
    pub const PROJECT_LIST: Markers = Markers {
        start: PROJECT_LIST_START,
        end: PROJECT_LIST_END,
    };
    pub const PROJECT_TABLE: Markers = Markers {
        start: PROJECT_TABLE_START,
        end: PROJECT_TABLE_END,
    };
    pub const LATEST_CHANGES: Markers = Markers {
        start: LATEST_CHANGES_START,
        end: LATEST_CHANGES_END,
    };

    /// Index of the start and end marker lines.
    fn locate(&self, lines: &[&str]) -> Result<(usize, usize)> {
        let start = lines.iter().position(|line| *line == self.start);
        let end = lines.iter().position(|line| *line == self.end);

        match (start, end) {
            (Some(start), Some(end)) if start < end => Ok((start, end)),
            (Some(_), Some(_)) => Err(SyncError::format(format!(
                "invalid marker order: {} / {}",
                self.start, self.end
            ))),
            _ => Err(SyncError::format(format!(
                "markers not found: {} / {}",
                self.start, self.end
            ))),
        }
    }
}

/// Lines strictly between the markers.
pub fn read_region<'a>(text: &'a str, markers: Markers) -> Result<Vec<&'a str>> {
    let lines: Vec<&str> = text.lines().collect();
    let (start, end) = markers.locate(&lines)?;
    Ok(lines[start + 1..end].to_vec())
}

/// Replace the interior of a region, keeping the marker lines.
///
/// The result always ends with a single trailing newline, so feeding the
/// output back in with the same `new_lines` yields identical text.
pub fn replace_region<S: AsRef<str>>(
    text: &str,
    markers: Markers,
    new_lines: &[S],
) -> Result<String> {
    let lines: Vec<&str> = text.lines().collect();
    let (start, end) = markers.locate(&lines)?;

    let mut updated: Vec<&str> = Vec::with_capacity(lines.len() + new_lines.len());
    updated.extend_from_slice(&lines[..=start]);
    updated.extend(new_lines.iter().map(AsRef::as_ref));
    updated.extend_from_slice(&lines[end..]);

    let mut out = updated.join("\n");
    out.push('\n');
    Ok(out)
}
