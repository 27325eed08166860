//! Library root for `howdy-hub-bot`.
//!
//! Howdy-hub-bot is a GitHub Action that reacts to issue and pull request events to:
//! - Welcome first-time and returning contributors
//! - Apply configured labels
//! - Assign the author, and sync pull request reviewers into the assignees
//! - Close items whose title contains a configured keyword
//!
//! Behavior is driven by an optional `.github/howdy-hub-bot.yml` in the repository,
//! merged over built-in defaults. GitHub access goes through the `GenericGithubClient`
//! trait, with an `octocrab` implementation.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Handles the single event that triggered this run:
/// - Initializes the crypto provider
/// - Creates the runtime context with the GitHub client
/// - Resolves the repository config and dispatches the event
pub async fn start(config: Config) -> Void {
    info!("Starting howdy-hub-bot ...");

    // Start the crypto provider; a provider installed earlier in the process is kept.
    let _ = crypto::ring::default_provider().install_default();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Handle the event.
    runtime.start().await?;

    Ok(())
}
