//! Event handling for howdy-hub-bot.
//!
//! This module turns a parsed webhook event into GitHub API calls:
//! - Issue and pull request lifecycle handlers
//! - First-time contributor detection
//! - Welcome comments

pub mod issue;
pub mod membership;
pub mod pull_request;
pub mod welcome;
