//! One sync run: parse, fetch, diff, render, persist

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::atomic_write::atomic_write;
use crate::changes::{change_line, digest};
use crate::error::{Result, SyncError};
use crate::fetch::{Provider, RepoSource};
use crate::project::parse_project_list;
use crate::region::{read_region, replace_region, Markers};
use crate::state::{PersistedRecord, StateFile};
use crate::status::StatusLabel;
use crate::table::{format_date, render_table, TableRow};

/// What happened to a single project during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReport {
    pub name: String,
    pub repo: String,
    pub provider: Provider,
    pub status: StatusLabel,
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub document: String,
    pub state: StateFile,
    pub change_lines: Vec<String>,
    pub reports: Vec<ProjectReport>,
}

impl SyncOutcome {
    pub fn changed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.changed).count()
    }
}

/// Compute the updated document and state without touching the filesystem.
///
/// Projects are fetched strictly in document order; the first failure aborts
/// the whole run.
pub fn sync_document(
    text: &str,
    previous: &StateFile,
    source: &dyn RepoSource,
    now: DateTime<Utc>,
) -> Result<SyncOutcome> {
    let projects = parse_project_list(text)?;

    // Fail on broken output markers before any network traffic.
    read_region(text, Markers::PROJECT_TABLE)?;
    read_region(text, Markers::LATEST_CHANGES)?;

    let mut state = previous.clone();
    let mut rows = Vec::with_capacity(projects.len());
    let mut changes = Vec::new();
    let mut reports = Vec::with_capacity(projects.len());

    for project in &projects {
        tracing::debug!(name = %project.name, repo = %project.repo, "fetching project");
        let fetched = source.fetch(project)?;

        let status = fetched.status_at(now);
        let last_update = format_date(fetched.latest_date());
        rows.push(TableRow::new(project, status, last_update));

        let line = change_line(project, &fetched, previous.previous_sha(&project.repo));
        let changed = line.is_some();
        changes.extend(line);

        tracing::info!(
            name = %project.name,
            provider = %fetched.provider,
            %status,
            changed,
            "project synced"
        );

        state.upsert(PersistedRecord {
            latest_date: fetched.latest_date().map(|d| d.to_rfc3339()),
            latest_sha: fetched.latest_sha().map(str::to_string),
            name: project.name.clone(),
            repo: project.repo.clone(),
            status,
        });
        reports.push(ProjectReport {
            name: project.name.clone(),
            repo: project.repo.clone(),
            provider: fetched.provider,
            status,
            changed,
        });
    }

    let change_lines = digest(changes);
    let document = replace_region(text, Markers::PROJECT_TABLE, &render_table(&rows))?;
    let document = replace_region(&document, Markers::LATEST_CHANGES, &change_lines)?;

    Ok(SyncOutcome {
        document,
        state,
        change_lines,
        reports,
    })
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub readme: PathBuf,
    pub state: PathBuf,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Run a sync against files on disk.
///
/// Both files are written only after every project has been fetched, so a
/// failed run leaves them as they were.
pub fn run_sync(options: &SyncOptions, source: &dyn RepoSource) -> Result<SyncOutcome> {
    let text = read_document(&options.readme)?;
    let previous = StateFile::load(&options.state)?;

    let outcome = sync_document(&text, &previous, source, Utc::now())?;

    if options.dry_run {
        tracing::info!("dry run, leaving files untouched");
        return Ok(outcome);
    }

    // State before README: a README on disk never reflects a run whose state
    // was not saved.
    outcome.state.save(&options.state)?;
    atomic_write(&options.readme, outcome.document.as_bytes())
        .map_err(|e| SyncError::io(&options.readme, e))?;

    Ok(outcome)
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
}
