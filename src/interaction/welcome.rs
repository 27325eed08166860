//! Welcome comments for newly opened items.

use tracing::{info, instrument};

use crate::{
    base::{
        templates::render_welcome,
        types::{RepoId, Void},
    },
    service::github::GithubClient,
};

use super::membership::is_first_time;

/// A pair of welcome templates, one for newcomers and one for returning authors.
#[derive(Debug, Clone, Copy)]
pub struct WelcomeTemplates<'a> {
    pub first_time: &'a str,
    pub returning: &'a str,
}

/// Classify `author` and post the matching welcome on item `number`.
#[instrument(skip(github, repo, templates))]
pub async fn post_welcome(github: &GithubClient, repo: &RepoId, number: u64, author: &str, templates: WelcomeTemplates<'_>) -> Void {
    let first_timer = is_first_time(github, repo, author).await?;
    let template = if first_timer { templates.first_time } else { templates.returning };

    github.create_comment(repo, number, &render_welcome(template, author)).await?;

    info!("Welcomed {} contributor @{author} on #{number}.", if first_timer { "first-time" } else { "returning" });

    Ok(())
}
