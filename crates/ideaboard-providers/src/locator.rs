//! Repository URL classification

use ideaboard_core::{Provider, Result, SyncError};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLocator {
    GitHub { owner: String, repo: String },
    /// Full project path, e.g. `group/subgroup/project`
    GitLab { path: String },
}

impl RepoLocator {
    pub fn parse(repo_url: &str) -> Result<Self> {
        let url = Url::parse(repo_url).map_err(|e| SyncError::InvalidRepoUrl {
            url: repo_url.to_string(),
            reason: e.to_string(),
        })?;
        let host = url
            .host_str()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let path = url.path().trim_matches('/');

        if host_matches(&host, "github.com") {
            let mut segments = path.split('/').filter(|s| !s.is_empty());
            return match (segments.next(), segments.next()) {
                (Some(owner), Some(repo)) => Ok(Self::GitHub {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                }),
                _ => Err(SyncError::InvalidRepoUrl {
                    url: repo_url.to_string(),
                    reason: "expected https://github.com/{owner}/{repo}".to_string(),
                }),
            };
        }

        if host_matches(&host, "gitlab.com") {
            if path.is_empty() {
                return Err(SyncError::InvalidRepoUrl {
                    url: repo_url.to_string(),
                    reason: "missing project path".to_string(),
                });
            }
            return Ok(Self::GitLab {
                path: path.to_string(),
            });
        }

        Err(SyncError::UnsupportedHost {
            url: repo_url.to_string(),
        })
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::GitHub { .. } => Provider::GitHub,
            Self::GitLab { .. } => Provider::GitLab,
        }
    }
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Percent-encode a GitLab project path for use as an API id.
pub fn encode_project_path(path: &str) -> String {
    url::form_urlencoded::byte_serialize(path.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_url() {
        assert_eq!(
            RepoLocator::parse("https://github.com/acme/widget").unwrap(),
            RepoLocator::GitHub {
                owner: "acme".to_string(),
                repo: "widget".to_string()
            }
        );
    }

    #[test]
    fn test_github_url_ignores_extra_segments() {
        let locator = RepoLocator::parse("https://www.GitHub.com/acme/widget/tree/main/").unwrap();
        assert_eq!(
            locator,
            RepoLocator::GitHub {
                owner: "acme".to_string(),
                repo: "widget".to_string()
            }
        );
        assert_eq!(locator.provider(), Provider::GitHub);
    }

    #[test]
    fn test_github_url_needs_owner_and_repo() {
        let err = RepoLocator::parse("https://github.com/acme").unwrap_err();
        assert!(matches!(err, SyncError::InvalidRepoUrl { .. }));
    }

    #[test]
    fn test_gitlab_url_keeps_full_path() {
        let locator = RepoLocator::parse("https://gitlab.com/acme/tools/gadget/").unwrap();
        assert_eq!(
            locator,
            RepoLocator::GitLab {
                path: "acme/tools/gadget".to_string()
            }
        );
        assert_eq!(locator.provider(), Provider::GitLab);
    }

    #[test]
    fn test_gitlab_url_needs_path() {
        assert!(matches!(
            RepoLocator::parse("https://gitlab.com/").unwrap_err(),
            SyncError::InvalidRepoUrl { .. }
        ));
    }

    #[test]
    fn test_other_hosts_are_unsupported() {
        for url in [
            "https://bitbucket.org/acme/widget",
            "https://notgithub.com/acme/widget",
            "https://codeberg.org/acme/widget",
        ] {
            assert!(
                matches!(
                    RepoLocator::parse(url).unwrap_err(),
                    SyncError::UnsupportedHost { .. }
                ),
                "expected unsupported host for {}",
                url
            );
        }
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            RepoLocator::parse("not a url").unwrap_err(),
            SyncError::InvalidRepoUrl { .. }
        ));
    }

    #[test]
    fn test_encode_project_path() {
        assert_eq!(encode_project_path("acme/tools/gadget"), "acme%2Ftools%2Fgadget");
        assert_eq!(encode_project_path("a-b_c.d"), "a-b_c.d");
    }
}
