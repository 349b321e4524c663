//! ideaboard core
//!
//! Keeps a README's project table in sync with repository activity:
//! - project list parsing from a marker region
//! - status derivation from release, archive and commit facts
//! - change tracking against persisted state
//! - marker region rewriting and state persistence

pub mod atomic_write;
pub mod changes;
pub mod error;
pub mod fetch;
pub mod project;
pub mod region;
pub mod state;
pub mod status;
pub mod sync;
pub mod table;

pub use changes::{change_line, digest, NO_CHANGES_LINE};
pub use error::{Result, SyncError};
pub use fetch::{short_sha, FetchResult, LatestCommit, Provider, RepoSource};
pub use project::{parse_project_list, Project};
pub use region::{read_region, replace_region, Markers};
pub use state::{PersistedRecord, StateFile};
pub use status::{compute_status, compute_status_at, StatusLabel, RECENT_DAYS_WIP};
pub use sync::{run_sync, sync_document, ProjectReport, SyncOptions, SyncOutcome};
pub use table::{format_date, parse_table, render_table, TableRow};
