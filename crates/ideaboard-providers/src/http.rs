//! Shared request plumbing for the provider clients

use chrono::{DateTime, FixedOffset};
use ideaboard_core::{Result, SyncError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ProviderConfig;

pub(crate) fn build_client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| SyncError::fetch("http client", e))
}

/// Send a request; transport failures and timeouts become `Fetch` errors
/// against `repo_url`.
pub(crate) fn send(request: RequestBuilder, repo_url: &str) -> Result<Response> {
    let response = request.send().map_err(|e| {
        if e.is_timeout() {
            SyncError::fetch(repo_url, format!("request timed out: {}", e))
        } else {
            SyncError::fetch(repo_url, e)
        }
    })?;
    tracing::debug!(url = %response.url(), status = %response.status(), "provider response");
    Ok(response)
}

/// Fail with `Fetch` unless the status is a success.
pub(crate) fn ensure_success(response: Response, repo_url: &str, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(SyncError::fetch(
        repo_url,
        format!("{} request failed with {}: {}", what, status, truncate(&body, 200)),
    ))
}

pub(crate) fn decode<T: DeserializeOwned>(
    response: Response,
    repo_url: &str,
    what: &str,
) -> Result<T> {
    response
        .json::<T>()
        .map_err(|e| SyncError::fetch(repo_url, format!("invalid {} response: {}", what, e)))
}

pub(crate) fn is_not_found(response: &Response) -> bool {
    response.status() == StatusCode::NOT_FOUND
}

pub(crate) fn parse_timestamp(
    value: Option<&str>,
    repo_url: &str,
) -> Result<Option<DateTime<FixedOffset>>> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw).map(Some).map_err(|e| {
            SyncError::fetch(repo_url, format!("invalid commit date {:?}: {}", raw, e))
        }),
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp(Some("2024-01-02T10:00:00.000+02:00"), "u")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-02T10:00:00+02:00");
        assert_eq!(parse_timestamp(None, "u").unwrap(), None);
        assert!(parse_timestamp(Some("yesterday"), "u").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
