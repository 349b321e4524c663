//! Provider configuration
//!
//! Tokens are handed in explicitly; nothing in this crate reads the
//! environment.

use secrecy::SecretString;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_GITLAB_API: &str = "https://gitlab.com/api/v4";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_base: String,
    /// Sent as `Authorization: token <value>`
    pub token: Option<SecretString>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITHUB_API.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitLabConfig {
    pub api_base: String,
    /// Sent as `PRIVATE-TOKEN: <value>`
    pub token: Option<SecretString>,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GITLAB_API.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub github: GitHubConfig,
    pub gitlab: GitLabConfig,
    /// Per-request timeout
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            gitlab: GitLabConfig::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("ideaboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProviderConfig {
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.github.token = Some(SecretString::from(token));
        self
    }

    pub fn with_gitlab_token(mut self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        self.gitlab.token = Some(SecretString::from(token));
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Base URL without a trailing slash.
pub(crate) fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}
