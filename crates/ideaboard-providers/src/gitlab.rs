//! GitLab REST API v4 client

use ideaboard_core::{FetchResult, LatestCommit, Provider, Result, SyncError};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::{trim_base, GitLabConfig};
use crate::http::{decode, ensure_success, is_not_found, parse_timestamp, send};
use crate::locator::encode_project_path;

const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: serde_json::Value,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    committed_date: Option<String>,
}

pub struct GitLabClient {
    client: Client,
    config: GitLabConfig,
}

impl GitLabClient {
    pub fn new(client: Client, config: GitLabConfig) -> Self {
        Self { client, config }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", trim_base(&self.config.api_base), path);
        let request = self.client.get(url);
        match &self.config.token {
            Some(token) => request.header("PRIVATE-TOKEN", token.expose_secret()),
            None => request,
        }
    }

    pub fn fetch(&self, repo_url: &str, project_path: &str) -> Result<FetchResult> {
        let response = send(
            self.get(&format!("/projects/{}", encode_project_path(project_path))),
            repo_url,
        )?;
        if is_not_found(&response) {
            return Err(SyncError::RepoNotFound {
                url: repo_url.to_string(),
            });
        }
        let info: ProjectResponse = decode(
            ensure_success(response, repo_url, "project")?,
            repo_url,
            "project",
        )?;

        let project_id = match &info.id {
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            other => {
                return Err(SyncError::fetch(
                    repo_url,
                    format!("unexpected project id: {}", other),
                ))
            }
        };
        let default_branch = info
            .default_branch
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let archived = info.archived.unwrap_or(false);

        let base = format!("/projects/{}", project_id);
        let latest_commit = self.latest_commit(repo_url, &base, &default_branch)?;
        let has_release = self.has_release(repo_url, &base)?;

        Ok(FetchResult {
            provider: Provider::GitLab,
            default_branch,
            archived,
            latest_commit,
            has_release,
        })
    }

    fn latest_commit(
        &self,
        repo_url: &str,
        base: &str,
        branch: &str,
    ) -> Result<Option<LatestCommit>> {
        let request = self
            .get(&format!("{}/repository/commits", base))
            .query(&[("ref_name", branch), ("per_page", "1")]);
        let response = send(request, repo_url)?;

        // Empty repositories have no default branch ref yet.
        if is_not_found(&response) {
            return Ok(None);
        }

        let commits: Vec<CommitResponse> =
            decode(ensure_success(response, repo_url, "commits")?, repo_url, "commits")?;
        let Some(commit) = commits.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(LatestCommit {
            committed_at: parse_timestamp(commit.committed_date.as_deref(), repo_url)?,
            message: commit.title,
            sha: commit.id,
        }))
    }

    fn has_release(&self, repo_url: &str, base: &str) -> Result<bool> {
        let request = self
            .get(&format!("{}/releases", base))
            .query(&[("per_page", "1")]);
        let response = send(request, repo_url)?;
        if response.status() != StatusCode::OK {
            return Ok(false);
        }

        let releases: Vec<serde_json::Value> = decode(response, repo_url, "releases")?;
        Ok(!releases.is_empty())
    }
}
