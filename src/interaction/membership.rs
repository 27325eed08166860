//! First-time contributor detection.

use tracing::{debug, instrument};

use crate::{
    base::types::{RepoId, Res},
    service::github::GithubClient,
};

/// Search query matching every issue and PR `author` has opened in `repo`.
pub fn author_search_query(repo: &RepoId, author: &str) -> String {
    format!("repo:{repo} author:{author}")
}

/// Whether `author` has no issue or PR in `repo` other than the current one.
///
/// The item that triggered the run is already indexed, so a single match still means
/// a first-time contributor. Search errors propagate.
#[instrument(skip(github, repo))]
pub async fn is_first_time(github: &GithubClient, repo: &RepoId, author: &str) -> Res<bool> {
    let total = github.search_issues_total_count(&author_search_query(repo, author)).await?;

    debug!("Found {total} item(s) by {author} in {repo}");

    Ok(total <= 1)
}
