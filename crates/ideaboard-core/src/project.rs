//! Declarative project list
//!
//! Grammar inside the `PROJECT_LIST` region, leading whitespace ignored:
//!
//! ```text
//! - name: Example
//!   repo: https://github.com/owner/example
//!   todo: write the docs
//! ```
//!
//! Items are delimited by `- name:` lines. `todo` is optional.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};
use crate::region::{read_region, Markers};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub repo: String,
    #[serde(default)]
    pub todo: String,
}

/// One classified line of the list grammar.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Name(&'a str),
    Repo(&'a str),
    Todo(&'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let line = raw.trim_start();
        if line.trim().is_empty() {
            return Line::Blank;
        }

        if let Some(rest) = line.strip_prefix('-') {
            if let Some(value) = rest.trim_start().strip_prefix("name:") {
                return Line::Name(value.trim());
            }
            return Line::Other;
        }

        if let Some(value) = line.strip_prefix("repo:") {
            return Line::Repo(value.trim());
        }
        if let Some(value) = line.strip_prefix("todo:") {
            return Line::Todo(value.trim());
        }

        Line::Other
    }
}

#[derive(Debug, Default)]
struct PendingItem {
    name: String,
    repo: Option<String>,
    todo: Option<String>,
}

enum ParserState {
    AwaitingItem,
    InItem(PendingItem),
}

/// Parse the project list out of a README.
pub fn parse_project_list(text: &str) -> Result<Vec<Project>> {
    let lines = read_region(text, Markers::PROJECT_LIST)?;

    let mut items: Vec<PendingItem> = Vec::new();
    let mut state = ParserState::AwaitingItem;

    for (offset, raw) in lines.iter().enumerate() {
        let line = Line::classify(raw);

        state = match (state, line) {
            (state, Line::Blank) => state,
            (state, Line::Name(name)) => {
                if name.is_empty() {
                    return Err(SyncError::format(format!(
                        "empty project name in project list (line {} of the list)",
                        offset + 1
                    )));
                }
                if let ParserState::InItem(item) = state {
                    items.push(item);
                }
                ParserState::InItem(PendingItem {
                    name: name.to_string(),
                    ..Default::default()
                })
            }
            (ParserState::InItem(mut item), Line::Repo(repo)) => {
                if !repo.is_empty() {
                    item.repo = Some(repo.to_string());
                }
                ParserState::InItem(item)
            }
            (ParserState::InItem(mut item), Line::Todo(todo)) => {
                item.todo = Some(todo.to_string());
                ParserState::InItem(item)
            }
            (state, _) => {
                tracing::debug!(line = %raw, "ignoring line in project list");
                state
            }
        };
    }

    if let ParserState::InItem(item) = state {
        items.push(item);
    }

    let mut seen = HashSet::new();
    let mut projects = Vec::with_capacity(items.len());
    for item in items {
        let repo = item
            .repo
            .ok_or_else(|| SyncError::format(format!("missing repo for project: {}", item.name)))?;
        if !seen.insert(repo.clone()) {
            return Err(SyncError::format(format!(
                "duplicate repo in project list: {}",
                repo
            )));
        }
        projects.push(Project {
            name: item.name,
            repo,
            todo: item.todo.unwrap_or_default(),
        });
    }

    tracing::debug!(count = projects.len(), "parsed project list");
    Ok(projects)
}
