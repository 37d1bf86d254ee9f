//! Read-only GitHub star count for the configured repository.
//!
//! A single GET with no retry. Counts are cached on disk, keyed by the repo
//! identity, with a fixed one-hour TTL.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GithubConfig;

const BASE_URL: &str = "https://api.github.com";
const CACHE_PREFIX: &str = "github-stars";
const CACHE_TTL_MS: i64 = 60 * 60 * 1000;
const USER_AGENT: &str = concat!("jobtrack/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum StarError {
    #[error("no GitHub repository configured")]
    Unconfigured,
    #[error("failed to fetch repository data")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    stargazers_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct StarCache {
    count: u64,
    /// Unix millis at write time.
    timestamp: i64,
}

pub struct StarService {
    github: GithubConfig,
    cache_dir: PathBuf,
}

impl StarService {
    pub fn new(github: GithubConfig, cache_dir: PathBuf) -> Self {
        Self { github, cache_dir }
    }

    fn identity(&self) -> Option<(&str, &str)> {
        match (self.github.username.as_deref(), self.github.repo.as_deref()) {
            (Some(user), Some(repo)) if !user.is_empty() && !repo.is_empty() => {
                Some((user, repo))
            }
            _ => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.identity().is_some()
    }

    pub fn repo_url(&self) -> Option<String> {
        self.identity()
            .map(|(user, repo)| format!("https://github.com/{user}/{repo}"))
    }

    fn cache_path(&self) -> Option<PathBuf> {
        let (user, repo) = self.identity()?;
        Some(self.cache_dir.join(format!("{CACHE_PREFIX}-{user}-{repo}.json")))
    }

    fn read_cache(&self) -> Option<u64> {
        let raw = fs::read_to_string(self.cache_path()?).ok()?;
        let cache: StarCache = serde_json::from_str(&raw).ok()?;
        let age = Utc::now().timestamp_millis() - cache.timestamp;
        (age < CACHE_TTL_MS).then_some(cache.count)
    }

    /// Cache write failures are ignored; the count was still fetched.
    fn write_cache(&self, count: u64) {
        let Some(path) = self.cache_path() else { return };
        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let cache = StarCache {
            count,
            timestamp: Utc::now().timestamp_millis(),
        };
        if let Ok(raw) = serde_json::to_string(&cache) {
            let _ = fs::write(path, raw);
        }
    }

    /// Fetch the live count, bypassing the cache.
    pub fn fetch_stars(&self) -> Result<u64, StarError> {
        let (user, repo) = self.identity().ok_or(StarError::Unconfigured)?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;
        let info: RepoInfo = client
            .get(format!("{BASE_URL}/repos/{user}/{repo}"))
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .send()?
            .error_for_status()?
            .json()?;
        Ok(info.stargazers_count)
    }

    /// Cached count when fresh, otherwise a live fetch that refreshes the
    /// cache.
    pub fn stars(&self) -> Result<u64, StarError> {
        if let Some(count) = self.read_cache() {
            debug!(count, "star count served from cache");
            return Ok(count);
        }
        let count = self.fetch_stars()?;
        self.write_cache(count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(username: Option<&str>, repo: Option<&str>, dir: &std::path::Path) -> StarService {
        StarService::new(
            GithubConfig {
                username: username.map(String::from),
                repo: repo.map(String::from),
            },
            dir.to_path_buf(),
        )
    }

    #[test]
    fn unconfigured_when_either_half_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!service(None, Some("repo"), dir.path()).is_configured());
        assert!(!service(Some("user"), None, dir.path()).is_configured());
        assert!(!service(Some(""), Some("repo"), dir.path()).is_configured());
        assert!(service(Some("user"), Some("repo"), dir.path()).is_configured());
    }

    #[test]
    fn repo_url_reflects_identity() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Some("user"), Some("repo"), dir.path());
        assert_eq!(svc.repo_url().unwrap(), "https://github.com/user/repo");
        assert!(service(None, None, dir.path()).repo_url().is_none());
    }

    #[test]
    fn fetch_without_identity_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(None, None, dir.path());
        assert!(matches!(svc.fetch_stars(), Err(StarError::Unconfigured)));
    }

    #[test]
    fn fresh_cache_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Some("user"), Some("repo"), dir.path());
        svc.write_cache(42);
        assert_eq!(svc.read_cache(), Some(42));
    }

    #[test]
    fn stale_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Some("user"), Some("repo"), dir.path());
        let stale = StarCache {
            count: 42,
            timestamp: Utc::now().timestamp_millis() - CACHE_TTL_MS - 1,
        };
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(
            svc.cache_path().unwrap(),
            serde_json::to_string(&stale).unwrap(),
        )
        .unwrap();
        assert_eq!(svc.read_cache(), None);
    }

    #[test]
    fn malformed_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(Some("user"), Some("repo"), dir.path());
        fs::write(svc.cache_path().unwrap(), "{broken").unwrap();
        assert_eq!(svc.read_cache(), None);
    }

    #[test]
    fn cache_key_includes_the_repo_identity() {
        let dir = tempfile::tempdir().unwrap();
        let a = service(Some("user"), Some("one"), dir.path());
        let b = service(Some("user"), Some("two"), dir.path());
        a.write_cache(1);
        assert_eq!(a.read_cache(), Some(1));
        assert_eq!(b.read_cache(), None);
    }
}
