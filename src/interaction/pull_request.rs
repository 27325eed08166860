//! Pull request lifecycle handling.

use std::slice;

use tracing::{debug, info, instrument};

use crate::{
    base::{
        event::{Action, PullRequestEvent},
        repo_config::RepoConfig,
        types::{RepoId, Void},
    },
    service::github::GithubClient,
};

use super::welcome::{WelcomeTemplates, post_welcome};

/// Handles a `pull_request` event.
///
/// Acts on `opened`, `reopened` and `ready_for_review`. Same flow as issues, plus the
/// requested reviewers are added as assignees after the author when syncing is enabled.
#[instrument(skip_all, fields(pull_request = event.pull_request.number, action = %event.action))]
pub async fn handle_pull_request(github: &GithubClient, repo: &RepoId, config: &RepoConfig, event: &PullRequestEvent) -> Void {
    if !matches!(event.action, Action::Opened | Action::Reopened | Action::ReadyForReview) {
        debug!("Ignoring pull request action.");
        return Ok(());
    }

    let pr = &event.pull_request;
    let author = &pr.user.login;

    // Auto-close on keyword.

    if config.should_auto_close(&pr.title) {
        github.close_pull_request(repo, pr.number).await?;
        info!("PR #{} closed – keyword match.", pr.number);
        return Ok(());
    }

    // Labels.

    if !config.labels.prs.is_empty() {
        github.add_labels(repo, pr.number, &config.labels.prs).await?;
    }

    // Author assignment.

    if config.auto_assign_author {
        github.add_assignees(repo, pr.number, slice::from_ref(author)).await?;
    }

    // Reviewers as assignees. The author may be in both sets; GitHub ignores the repeat.

    let reviewers = pr.reviewer_logins();

    if config.sync_assignees_with_reviewers && !reviewers.is_empty() {
        github.add_assignees(repo, pr.number, &reviewers).await?;
        info!("Assigned {} requested reviewer(s) to PR #{}.", reviewers.len(), pr.number);
    }

    // Welcome.

    let templates = WelcomeTemplates {
        first_time: &config.welcome.first_time_pr,
        returning: &config.welcome.returning_pr,
    };

    post_welcome(github, repo, pr.number, author, templates).await
}
