//! ideaboard providers
//!
//! Blocking clients for the repository hosts ideaboard understands:
//! - GitHub (REST v3)
//! - GitLab (REST v4)

mod client;
mod config;
mod github;
mod gitlab;
mod http;
mod locator;

pub use client::RepoClient;
pub use config::{
    GitHubConfig, GitLabConfig, ProviderConfig, DEFAULT_GITHUB_API, DEFAULT_GITLAB_API,
    DEFAULT_TIMEOUT_SECONDS,
};
pub use github::GitHubClient;
pub use gitlab::GitLabClient;
pub use locator::{encode_project_path, RepoLocator};
pub use secrecy::SecretString;
