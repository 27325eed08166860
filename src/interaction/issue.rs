//! Issue lifecycle handling.

use std::slice;

use tracing::{debug, info, instrument};

use crate::{
    base::{
        event::{Action, IssueEvent},
        repo_config::RepoConfig,
        types::{RepoId, Void},
    },
    service::github::GithubClient,
};

use super::welcome::{WelcomeTemplates, post_welcome};

/// Handles an `issues` event.
///
/// Only `opened` and `reopened` are acted on. A title containing the auto-close keyword
/// closes the issue and nothing else happens; otherwise labels, author assignment and the
/// welcome comment follow in that order, and the first failing call ends the run.
#[instrument(skip_all, fields(issue = event.issue.number, action = %event.action))]
pub async fn handle_issue(github: &GithubClient, repo: &RepoId, config: &RepoConfig, event: &IssueEvent) -> Void {
    if !matches!(event.action, Action::Opened | Action::Reopened) {
        debug!("Ignoring issue action.");
        return Ok(());
    }

    let issue = &event.issue;
    let author = &issue.user.login;

    // Auto-close on keyword.

    if config.should_auto_close(&issue.title) {
        github.close_issue(repo, issue.number).await?;
        info!("Issue #{} closed – keyword match.", issue.number);
        return Ok(());
    }

    // Labels.

    if !config.labels.issues.is_empty() {
        github.add_labels(repo, issue.number, &config.labels.issues).await?;
    }

    // Author assignment.

    if config.auto_assign_author {
        github.add_assignees(repo, issue.number, slice::from_ref(author)).await?;
    }

    // Welcome.

    let templates = WelcomeTemplates {
        first_time: &config.welcome.first_time_issue,
        returning: &config.welcome.returning_issue,
    };

    post_welcome(github, repo, issue.number, author, templates).await
}
