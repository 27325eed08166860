//! Webhook payloads the bot reacts to.
//!
//! GitHub Actions writes the triggering payload to the file named by `GITHUB_EVENT_PATH`
//! and the event kind to `GITHUB_EVENT_NAME`. Only `issues` and `pull_request` are
//! parsed; everything else is carried as [`Event::Unhandled`].

use std::{fmt, fs, path::Path};

use anyhow::{Context, anyhow};
use serde::Deserialize;

use super::types::Res;

/// Event name for issue lifecycle notifications.
pub const ISSUES_EVENT: &str = "issues";

/// Event name for pull request lifecycle notifications.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// The action verb carried by a lifecycle event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A new issue or pull request.
    Opened,
    /// A closed item opened again.
    Reopened,
    /// A draft pull request marked ready.
    ReadyForReview,
    /// Any other action; the bot ignores these.
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Opened => "opened",
            Action::Reopened => "reopened",
            Action::ReadyForReview => "ready_for_review",
            Action::Other => "other",
        };

        f.write_str(name)
    }
}

/// A GitHub account, as referenced from a payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// The account's handle.
    pub login: String,
}

/// The issue an `issues` event is about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: u64,
    /// Current title.
    pub title: String,
    /// The author.
    pub user: User,
}

/// The pull request a `pull_request` event is about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number within the repository.
    pub number: u64,
    /// Current title.
    pub title: String,
    /// The author.
    pub user: User,
    /// Users whose review was requested; GitHub may omit this or send `null`.
    #[serde(default)]
    pub requested_reviewers: Option<Vec<User>>,
}

impl PullRequest {
    /// Logins of all requested reviewers, in payload order.
    pub fn reviewer_logins(&self) -> Vec<String> {
        self.requested_reviewers.iter().flatten().map(|u| u.login.clone()).collect()
    }
}

/// An `issues` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    /// What happened to the issue.
    pub action: Action,
    /// The issue itself.
    pub issue: Issue,
}

/// A `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// What happened to the pull request.
    pub action: Action,
    /// The pull request itself.
    pub pull_request: PullRequest,
}

/// The triggering event, discriminated by event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An `issues` event.
    Issues(IssueEvent),
    /// A `pull_request` event.
    PullRequest(PullRequestEvent),
    /// Any other event, by name.
    Unhandled(String),
}

#[derive(Deserialize)]
struct RawIssuesPayload {
    #[serde(default)]
    action: Action,
    issue: Option<Issue>,
}

#[derive(Deserialize)]
struct RawPullRequestPayload {
    #[serde(default)]
    action: Action,
    pull_request: Option<PullRequest>,
}

impl Event {
    /// Parse a JSON payload for the given event name.
    pub fn parse(name: &str, payload: &str) -> Res<Self> {
        match name {
            ISSUES_EVENT => {
                let raw: RawIssuesPayload = serde_json::from_str(payload).context("Malformed issues payload")?;
                let issue = raw.issue.ok_or_else(|| anyhow!("Missing issue payload"))?;

                Ok(Event::Issues(IssueEvent { action: raw.action, issue }))
            }
            PULL_REQUEST_EVENT => {
                let raw: RawPullRequestPayload = serde_json::from_str(payload).context("Malformed pull_request payload")?;
                let pull_request = raw.pull_request.ok_or_else(|| anyhow!("Missing pull_request payload"))?;

                Ok(Event::PullRequest(PullRequestEvent { action: raw.action, pull_request }))
            }
            other => Ok(Event::Unhandled(other.to_string())),
        }
    }

    /// Load the event from the payload file written by the runner.
    ///
    /// The file is only read for event kinds the bot handles.
    pub fn load(name: &str, payload_path: Option<&Path>) -> Res<Self> {
        if name != ISSUES_EVENT && name != PULL_REQUEST_EVENT {
            return Ok(Event::Unhandled(name.to_string()));
        }

        let path = payload_path.ok_or_else(|| anyhow!("Missing {name} payload: GITHUB_EVENT_PATH is not set."))?;
        let payload = fs::read_to_string(path).with_context(|| format!("Failed to read event payload `{}`", path.display()))?;

        Self::parse(name, &payload)
    }

    /// The event name this value was parsed from.
    pub fn name(&self) -> &str {
        match self {
            Event::Issues(_) => ISSUES_EVENT,
            Event::PullRequest(_) => PULL_REQUEST_EVENT,
            Event::Unhandled(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_issue_event() {
        let payload = json!({
            "action": "opened",
            "issue": { "number": 12, "title": "Crash on start", "user": { "login": "octocat" } },
            "repository": { "full_name": "octo-org/hello" }
        });

        let event = Event::parse("issues", &payload.to_string()).unwrap();

        let Event::Issues(event) = event else { panic!("expected an issue event") };
        assert_eq!(event.action, Action::Opened);
        assert_eq!(event.issue.number, 12);
        assert_eq!(event.issue.user.login, "octocat");
    }

    #[test]
    fn parses_pull_request_with_reviewers() {
        let payload = json!({
            "action": "ready_for_review",
            "number": 5,
            "pull_request": {
                "number": 5,
                "title": "Add feature",
                "user": { "login": "octocat" },
                "requested_reviewers": [{ "login": "hubot" }, { "login": "monalisa" }]
            }
        });

        let Event::PullRequest(event) = Event::parse("pull_request", &payload.to_string()).unwrap() else {
            panic!("expected a pull request event")
        };

        assert_eq!(event.action, Action::ReadyForReview);
        assert_eq!(event.pull_request.reviewer_logins(), vec!["hubot", "monalisa"]);
    }

    #[test]
    fn null_reviewers_are_empty() {
        let payload = json!({
            "action": "opened",
            "pull_request": { "number": 1, "title": "t", "user": { "login": "a" }, "requested_reviewers": null }
        });

        let Event::PullRequest(event) = Event::parse("pull_request", &payload.to_string()).unwrap() else {
            panic!("expected a pull request event")
        };

        assert!(event.pull_request.reviewer_logins().is_empty());
    }

    #[test]
    fn unknown_action_is_other() {
        let payload = json!({
            "action": "labeled",
            "issue": { "number": 1, "title": "t", "user": { "login": "a" } }
        });

        let Event::Issues(event) = Event::parse("issues", &payload.to_string()).unwrap() else {
            panic!("expected an issue event")
        };

        assert_eq!(event.action, Action::Other);
    }

    #[test]
    fn missing_issue_object_is_an_error() {
        let err = Event::parse("issues", r#"{"action":"opened"}"#).unwrap_err();

        assert_eq!(err.to_string(), "Missing issue payload");
    }

    #[test]
    fn other_event_names_are_unhandled() {
        let event = Event::load("push", None).unwrap();

        assert_eq!(event, Event::Unhandled("push".to_string()));
        assert_eq!(event.name(), "push");
    }

    #[test]
    fn handled_event_without_payload_path_fails() {
        assert!(Event::load("pull_request", None).is_err());
    }
}
