//! Status table rendering and parsing

use chrono::{DateTime, TimeZone, Utc};

use crate::project::Project;
use crate::status::StatusLabel;

pub const TABLE_HEADER: &str = "| Project | Status | Todo | Last Update |";
pub const TABLE_SEPARATOR: &str = "| --- | --- | --- | --- |";

/// Placeholder for an empty todo or unknown date.
pub const EMPTY_CELL: &str = "-";

/// Commit date as shown in the table and the change digest.
pub fn format_date<Tz: TimeZone>(value: Option<&DateTime<Tz>>) -> String {
    match value {
        Some(value) => value.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        None => EMPTY_CELL.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub repo: String,
    pub status: String,
    pub todo: String,
    pub last_update: String,
}

impl TableRow {
    pub fn new(project: &Project, status: StatusLabel, last_update: String) -> Self {
        let todo = project.todo.trim();
        Self {
            name: project.name.trim().to_string(),
            repo: project.repo.trim().to_string(),
            status: status.to_string(),
            todo: if todo.is_empty() {
                EMPTY_CELL.to_string()
            } else {
                todo.to_string()
            },
            last_update,
        }
    }

    /// Markdown row. `\` and `|` are escaped in every cell, `[` and `]`
    /// additionally in the link text.
    pub fn render(&self) -> String {
        format!(
            "| [{}]({}) | {} | {} | {} |",
            escape(&self.name, &['|', '[', ']']),
            escape(&self.repo, &['|']),
            escape(&self.status, &['|']),
            escape(&self.todo, &['|']),
            escape(&self.last_update, &['|'])
        )
    }

    /// Read back a row produced by [`TableRow::render`].
    pub fn parse(line: &str) -> Option<Self> {
        let inner = line.trim().strip_prefix('|')?.strip_suffix('|')?;
        let cells = split_cells(inner);
        let [project, status, todo, last_update] = cells.as_slice() else {
            return None;
        };

        let (name, repo) = split_link(project)?;

        Some(Self {
            name: unescape(name),
            repo: unescape(repo),
            status: unescape(status),
            todo: unescape(todo),
            last_update: unescape(last_update),
        })
    }
}

fn escape(value: &str, specials: &[char]) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || specials.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }
    out
}

/// Split a row interior on unescaped `|`, leaving escapes in the cells.
fn split_cells(inner: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in inner.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '|' => {
                cells.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    cells.push(inner[start..].trim());
    cells
}

/// `[name](repo)` split at the first unescaped `]`.
fn split_link(raw: &str) -> Option<(&str, &str)> {
    let body = raw.strip_prefix('[')?.strip_suffix(')')?;
    let mut escaped = false;
    for (idx, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ']' => {
                let repo = body[idx + 1..].strip_prefix('(')?;
                return Some((&body[..idx], repo));
            }
            _ => {}
        }
    }
    None
}

/// Header, separator and one line per row.
pub fn render_table(rows: &[TableRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(TABLE_HEADER.to_string());
    lines.push(TABLE_SEPARATOR.to_string());
    lines.extend(rows.iter().map(TableRow::render));
    lines
}

/// Parse the rows of a rendered table, skipping the header and separator.
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> Vec<TableRow> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| *line != TABLE_HEADER && *line != TABLE_SEPARATOR)
        .filter_map(TableRow::parse)
        .collect()
}
