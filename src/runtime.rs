//! Runtime services and event dispatch for the howdy-hub-bot.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        event::Event,
        repo_config::RepoConfig,
        types::{RepoId, Res, Void},
    },
    interaction::{issue::handle_issue, pull_request::handle_pull_request},
    service::github::GithubClient,
};

/// Runtime service context for a single run.
///
/// This struct holds the configuration and the GitHub client, both trivially cloneable.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The GitHub client instance.
    pub github: GithubClient,
}

impl Runtime {
    /// Create a new runtime instance.
    ///
    /// Fails when no token is available, before any request is made.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let github = GithubClient::octocrab(&config)?;

        Ok(Self { config, github })
    }

    /// Resolve the repository config, load the triggering event, and handle it.
    #[instrument(skip_all)]
    pub async fn start(&self) -> Void {
        let repo_config = RepoConfig::resolve(self.config.workspace(), self.config.config_path());
        let repo = self.config.repo()?;
        let event = Event::load(self.config.event_name()?, self.config.event_path())?;

        self.dispatch(&repo, &repo_config, &event).await
    }

    /// Route an event to its handler; unhandled kinds are skipped.
    #[instrument(skip_all, fields(event = event.name(), repo = %repo))]
    pub async fn dispatch(&self, repo: &RepoId, repo_config: &RepoConfig, event: &Event) -> Void {
        match event {
            Event::Issues(event) => handle_issue(&self.github, repo, repo_config, event).await,
            Event::PullRequest(event) => handle_pull_request(&self.github, repo, repo_config, event).await,
            Event::Unhandled(name) => {
                info!("Event '{name}' not handled – skipping.");
                Ok(())
            }
        }
    }
}
