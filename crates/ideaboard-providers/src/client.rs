//! Provider dispatch

use ideaboard_core::{FetchResult, Project, RepoSource, Result};

use crate::config::ProviderConfig;
use crate::github::GitHubClient;
use crate::gitlab::GitLabClient;
use crate::http::build_client;
use crate::locator::RepoLocator;

/// Fetches repository facts from whichever host a project lives on.
pub struct RepoClient {
    github: GitHubClient,
    gitlab: GitLabClient,
}

impl RepoClient {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            github: GitHubClient::new(client.clone(), config.github),
            gitlab: GitLabClient::new(client, config.gitlab),
        })
    }

    pub fn fetch_url(&self, repo_url: &str) -> Result<FetchResult> {
        match RepoLocator::parse(repo_url)? {
            RepoLocator::GitHub { owner, repo } => self.github.fetch(repo_url, &owner, &repo),
            RepoLocator::GitLab { path } => self.gitlab.fetch(repo_url, &path),
        }
    }
}

impl RepoSource for RepoClient {
    fn fetch(&self, project: &Project) -> Result<FetchResult> {
        self.fetch_url(&project.repo)
    }
}
