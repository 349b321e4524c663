//! GitHub REST API client

use ideaboard_core::{FetchResult, LatestCommit, Provider, Result, SyncError};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::{trim_base, GitHubConfig};
use crate::http::{decode, ensure_success, is_not_found, parse_timestamp, send};

const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Deserialize)]
struct RepoResponse {
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    #[serde(default)]
    commit: Option<CommitDetail>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    committer: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    #[serde(default)]
    date: Option<String>,
}

pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(client: Client, config: GitHubConfig) -> Self {
        Self { client, config }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", trim_base(&self.config.api_base), path);
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        match &self.config.token {
            Some(token) => {
                request.header("Authorization", format!("token {}", token.expose_secret()))
            }
            None => request,
        }
    }

    pub fn fetch(&self, repo_url: &str, owner: &str, repo: &str) -> Result<FetchResult> {
        let base = format!("/repos/{}/{}", owner, repo);

        let response = send(self.get(&base), repo_url)?;
        if is_not_found(&response) {
            return Err(SyncError::RepoNotFound {
                url: repo_url.to_string(),
            });
        }
        let info: RepoResponse = decode(
            ensure_success(response, repo_url, "repository")?,
            repo_url,
            "repository",
        )?;
        let default_branch = info
            .default_branch
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let archived = info.archived.unwrap_or(false);

        let latest_commit = self.latest_commit(repo_url, &base, &default_branch)?;

        let response = send(self.get(&format!("{}/releases/latest", base)), repo_url)?;
        let has_release = match response.status() {
            StatusCode::OK => true,
            StatusCode::NOT_FOUND => false,
            _ => {
                ensure_success(response, repo_url, "release")?;
                false
            }
        };

        Ok(FetchResult {
            provider: Provider::GitHub,
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
            .get(&format!("{}/commits", base))
            .query(&[("sha", branch), ("per_page", "1")]);
        let response = send(request, repo_url)?;

        // 409 Conflict: "Git Repository is empty."
        if response.status() == StatusCode::CONFLICT {
            return Ok(None);
        }

        let commits: Vec<CommitResponse> =
            decode(ensure_success(response, repo_url, "commits")?, repo_url, "commits")?;
        let Some(commit) = commits.into_iter().next() else {
            return Ok(None);
        };

        let detail = commit.commit;
        let date = detail
            .as_ref()
            .and_then(|d| d.committer.as_ref())
            .and_then(|c| c.date.as_deref());

        Ok(Some(LatestCommit {
            committed_at: parse_timestamp(date, repo_url)?,
            message: detail.and_then(|d| d.message),
            sha: commit.sha,
        }))
    }
}
