//! The per-repository bot configuration (`.github/howdy-hub-bot.yml`).
//!
//! Every field is optional in the file. Missing top-level keys, and missing keys inside
//! `welcome` and `labels`, are filled from the built-in defaults. Lists are taken as
//! written; they are never merged element by element.

use std::{fs, path::Path, sync::LazyLock};

use anyhow::Context;
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument, warn};

use super::{actions, templates, types::Res};

/// Where the config file lives when the `config-path` input is not given.
pub const DEFAULT_CONFIG_PATH: &str = ".github/howdy-hub-bot.yml";

/// Default keyword that closes an issue or PR when it appears in the title.
fn default_auto_close_keyword() -> String {
    "complete".to_string()
}

fn default_true() -> bool {
    true
}

fn default_first_time_issue() -> String {
    templates::FIRST_TIME_ISSUE.to_string()
}

fn default_returning_issue() -> String {
    templates::RETURNING_ISSUE.to_string()
}

fn default_first_time_pr() -> String {
    templates::FIRST_TIME_PR.to_string()
}

fn default_returning_pr() -> String {
    templates::RETURNING_PR.to_string()
}

/// Treat an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

static DEFAULTS: LazyLock<RepoConfig> = LazyLock::new(|| RepoConfig {
    welcome: Welcome::default(),
    labels: Labels::default(),
    auto_close_on_title_contains: default_auto_close_keyword(),
    auto_assign_author: default_true(),
    auto_unassign_if_removed: default_true(),
    sync_assignees_with_reviewers: default_true(),
});

/// Welcome comment templates. `{{author}}` is replaced with an `@login` mention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Welcome {
    /// Posted on an author's first issue in the repository.
    #[serde(default = "default_first_time_issue")]
    pub first_time_issue: String,
    /// Posted on issues from authors with earlier activity.
    #[serde(default = "default_returning_issue")]
    pub returning_issue: String,
    /// Posted on an author's first pull request in the repository.
    #[serde(default = "default_first_time_pr")]
    pub first_time_pr: String,
    /// Posted on pull requests from authors with earlier activity.
    #[serde(default = "default_returning_pr")]
    pub returning_pr: String,
}

impl Default for Welcome {
    fn default() -> Self {
        Self {
            first_time_issue: default_first_time_issue(),
            returning_issue: default_returning_issue(),
            first_time_pr: default_first_time_pr(),
            returning_pr: default_returning_pr(),
        }
    }
}

/// Labels applied to newly opened items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Labels {
    /// Labels for new issues.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Labels for new pull requests.
    #[serde(default)]
    pub prs: Vec<String>,
}

/// Bot behavior for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoConfig {
    /// Welcome comment templates.
    #[serde(default, deserialize_with = "null_as_default")]
    pub welcome: Welcome,
    /// Labels added on open.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Labels,
    /// Case-insensitive keyword; a title containing it gets the item closed.
    #[serde(default = "default_auto_close_keyword")]
    pub auto_close_on_title_contains: String,
    /// Assign the author to their own issue or pull request.
    #[serde(default = "default_true")]
    pub auto_assign_author: bool,
    /// Parsed for compatibility; no handler consults it yet.
    #[serde(default = "default_true")]
    pub auto_unassign_if_removed: bool,
    /// Assign requested reviewers to the pull request.
    #[serde(default = "default_true")]
    pub sync_assignees_with_reviewers: bool,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self::defaults().clone()
    }
}

impl RepoConfig {
    /// The built-in defaults, constructed once per process.
    pub fn defaults() -> &'static RepoConfig {
        &DEFAULTS
    }

    /// Resolve the config at `path` (relative to `workspace`) over the defaults.
    ///
    /// Never fails: a missing file yields the defaults with a notice, and an unreadable
    /// or malformed one yields the defaults with a warning.
    #[instrument(skip_all, fields(path = %path))]
    pub fn resolve(workspace: &Path, path: &str) -> RepoConfig {
        let full = workspace.join(path);

        if !full.exists() {
            info!("Config file '{path}' not found – using defaults.");
            return Self::default();
        }

        match Self::load_file(&full) {
            Ok(config) => config,
            Err(err) => {
                let message = format!("Config load failed: {err:#}");
                warn!("{message}");
                actions::warning(&message);

                Self::default()
            }
        }
    }

    fn load_file(path: &Path) -> Res<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("could not read `{}`", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse YAML text; an empty document yields the defaults.
    pub fn parse(raw: &str) -> Res<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: Option<Self> = serde_yaml::from_str(raw)?;

        Ok(parsed.unwrap_or_default())
    }

    /// Whether `title` contains the auto-close keyword, ignoring case.
    ///
    /// The keyword is used as written, so an empty one matches every title.
    pub fn should_auto_close(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.auto_close_on_title_contains.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fully_populated() {
        let config = RepoConfig::defaults();

        assert_eq!(config.welcome.first_time_issue, templates::FIRST_TIME_ISSUE);
        assert_eq!(config.welcome.returning_pr, templates::RETURNING_PR);
        assert!(config.labels.issues.is_empty());
        assert!(config.labels.prs.is_empty());
        assert_eq!(config.auto_close_on_title_contains, "complete");
        assert!(config.auto_assign_author);
        assert!(config.auto_unassign_if_removed);
        assert!(config.sync_assignees_with_reviewers);
    }

    #[test]
    fn partial_labels_keep_other_defaults() {
        let config = RepoConfig::parse("labels:\n  issues: [bug]\n").unwrap();

        assert_eq!(config.labels.issues, vec!["bug"]);
        assert!(config.labels.prs.is_empty());
        assert_eq!(config.welcome, Welcome::default());
        assert_eq!(config.auto_close_on_title_contains, "complete");
    }

    #[test]
    fn partial_welcome_keeps_other_templates() {
        let yaml = r#"
welcome:
  first_time_pr: "Welcome aboard {{ author }}!"
autoAssignAuthor: false
syncAssigneesWithReviewers: false
autoCloseOnTitleContains: wontfix
"#;

        let config = RepoConfig::parse(yaml).unwrap();

        assert_eq!(config.welcome.first_time_pr, "Welcome aboard {{ author }}!");
        assert_eq!(config.welcome.first_time_issue, templates::FIRST_TIME_ISSUE);
        assert_eq!(config.welcome.returning_issue, templates::RETURNING_ISSUE);
        assert_eq!(config.welcome.returning_pr, templates::RETURNING_PR);
        assert!(!config.auto_assign_author);
        assert!(!config.sync_assignees_with_reviewers);
        assert!(config.auto_unassign_if_removed);
        assert_eq!(config.auto_close_on_title_contains, "wontfix");
    }

    #[test]
    fn null_groups_and_empty_documents_fall_back() {
        assert_eq!(RepoConfig::parse("welcome:\nlabels: ~\n").unwrap(), *RepoConfig::defaults());
        assert_eq!(RepoConfig::parse("").unwrap(), *RepoConfig::defaults());
        assert_eq!(RepoConfig::parse("~\n").unwrap(), *RepoConfig::defaults());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(RepoConfig::parse("labels: [unterminated").is_err());
        assert!(RepoConfig::parse("autoAssignAuthor: sometimes").is_err());
    }

    #[test]
    fn resolve_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = RepoConfig::resolve(dir.path(), DEFAULT_CONFIG_PATH);

        assert_eq!(config, *RepoConfig::defaults());
    }

    #[test]
    fn resolve_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bot.yml"), "labels: {issues: [bug").unwrap();

        let config = RepoConfig::resolve(dir.path(), "bot.yml");

        assert_eq!(config, *RepoConfig::defaults());
    }

    #[test]
    fn resolve_reads_file_relative_to_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_PATH), "labels:\n  prs: [needs-review, triage]\n").unwrap();

        let config = RepoConfig::resolve(dir.path(), DEFAULT_CONFIG_PATH);

        assert_eq!(config.labels.prs, vec!["needs-review", "triage"]);
        assert!(config.labels.issues.is_empty());
    }

    #[test]
    fn keyword_match_ignores_case() {
        let config = RepoConfig::defaults();

        assert!(config.should_auto_close("Mark this as COMPLETE"));
        assert!(config.should_auto_close("Incomplete docs"));
        assert!(!config.should_auto_close("Crash on start"));
    }

    #[test]
    fn empty_keyword_matches_every_title() {
        let config = RepoConfig::parse("autoCloseOnTitleContains: \"\"\n").unwrap();

        assert!(config.should_auto_close("Anything"));
        assert!(config.should_auto_close(""));
    }

    #[test]
    fn keyword_whitespace_is_significant() {
        let config = RepoConfig::parse("autoCloseOnTitleContains: \"wip \"\n").unwrap();

        assert!(!config.should_auto_close("Swipe gesture"));
        assert!(config.should_auto_close("WIP: swipe gesture"));
        assert!(!config.should_auto_close("WIP:swipe"));
    }
}
