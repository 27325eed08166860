pub mod octocrab;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{RepoId, Res, Void};

// Traits.

/// Generic GitHub client trait that clients must implement.
///
/// This trait covers the handful of REST operations the bot performs. Implementing it
/// allows the handlers to run against a different backend, or a mock in tests.
#[async_trait]
pub trait GenericGithubClient: Send + Sync + 'static {
    /// Search issues and pull requests, returning only the total match count.
    ///
    /// Implementations request a single result per page; only the count is used.
    async fn search_issues_total_count(&self, query: &str) -> Res<u64>;

    /// Set an issue's state to closed.
    async fn close_issue(&self, repo: &RepoId, number: u64) -> Void;

    /// Set a pull request's state to closed.
    async fn close_pull_request(&self, repo: &RepoId, number: u64) -> Void;

    /// Add labels to an issue or pull request.
    async fn add_labels(&self, repo: &RepoId, number: u64, labels: &[String]) -> Void;

    /// Add assignees to an issue or pull request.
    ///
    /// Logins that are already assigned are left as they are by GitHub.
    async fn add_assignees(&self, repo: &RepoId, number: u64, assignees: &[String]) -> Void;

    /// Post a comment on an issue or pull request.
    async fn create_comment(&self, repo: &RepoId, number: u64, body: &str) -> Void;
}

// Structs.

/// GitHub client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct GithubClient {
    inner: Arc<dyn GenericGithubClient>,
}

impl Deref for GithubClient {
    type Target = dyn GenericGithubClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl GithubClient {
    pub fn new(inner: Arc<dyn GenericGithubClient>) -> Self {
        Self { inner }
    }
}
