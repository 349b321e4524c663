//! Optional YAML configuration file and settings resolution
//!
//! Precedence: command-line flags, then the config file, then defaults.
//! API tokens only ever come from the environment.

use anyhow::{anyhow, Context, Result};
use ideaboard_providers::{ProviderConfig, SecretString};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_README: &str = "README.md";
pub const DEFAULT_STATE: &str = "data/state.json";
pub const DEFAULT_GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_GITLAB_TOKEN_ENV: &str = "GITLAB_TOKEN";

const CONFIG_CANDIDATES: &[&str] = &["ideaboard.yml", "ideaboard.yaml", ".ideaboard.yml"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub readme: Option<PathBuf>,

    #[serde(default)]
    pub state: Option<PathBuf>,

    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    #[serde(default)]
    pub github: HostSettings,

    #[serde(default)]
    pub gitlab: HostSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostSettings {
    /// Override the API base URL (self-hosted mirrors, tests)
    #[serde(default)]
    pub api_base: Option<String>,

    /// Environment variable holding the API token
    #[serde(default)]
    pub token_env: Option<String>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load an explicit config file, or the first candidate found in `dir`.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
            return Self::from_file(path);
        }

        for candidate in CONFIG_CANDIDATES {
            let path = dir.join(candidate);
            if path.exists() {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub readme: Option<PathBuf>,
    pub state: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub readme: PathBuf,
    pub state: PathBuf,
    pub providers: ProviderConfig,
}

impl Settings {
    /// Merge flags, file and defaults. `env` looks up token variables.
    pub fn resolve<F>(overrides: Overrides, file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut providers = ProviderConfig::default();

        if let Some(timeout) = overrides.timeout_seconds.or(file.timeout_seconds) {
            providers.timeout_seconds = timeout;
        }
        if let Some(base) = file.github.api_base {
            providers.github.api_base = base;
        }
        if let Some(base) = file.gitlab.api_base {
            providers.gitlab.api_base = base;
        }

        let github_env = file
            .github
            .token_env
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_TOKEN_ENV);
        let gitlab_env = file
            .gitlab
            .token_env
            .as_deref()
            .unwrap_or(DEFAULT_GITLAB_TOKEN_ENV);
        providers.github.token = lookup_token(&env, github_env);
        providers.gitlab.token = lookup_token(&env, gitlab_env);

        Self {
            readme: overrides
                .readme
                .or(file.readme)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_README)),
            state: overrides
                .state
                .or(file.state)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE)),
            providers,
        }
    }
}

fn lookup_token<F>(env: &F, name: &str) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}
