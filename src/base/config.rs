//! Load configuration via `config` crate with env-override support.
//!
//! Inside a workflow run every value arrives through the environment: action inputs as
//! `INPUT_<NAME>` and runner context as `GITHUB_*`. A TOML file can supply the same keys
//! for local runs.

use std::{
    collections::HashMap,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, anyhow};
use serde::Deserialize;

use super::{
    repo_config::DEFAULT_CONFIG_PATH,
    types::{RepoId, Res},
};

/// Environment variables the bot reads; anything else in the environment is ignored.
const ENV_KEYS: &[&str] = &[
    "INPUT_REPO-TOKEN",
    "INPUT_CONFIG-PATH",
    "GITHUB_TOKEN",
    "GITHUB_WORKSPACE",
    "GITHUB_EVENT_NAME",
    "GITHUB_EVENT_PATH",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
];

/// Configuration for the howdy-hub-bot process.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared, loaded values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Raw values as read from the environment or file; read them through [`Config`]'s accessors.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Token from the `repo-token` input (`INPUT_REPO-TOKEN`).
    #[serde(default, alias = "input_repo-token")]
    pub repo_token: Option<String>,
    /// Repository config path from the `config-path` input (`INPUT_CONFIG-PATH`).
    #[serde(default, alias = "input_config-path")]
    pub config_path: Option<String>,
    /// Default workflow token (`GITHUB_TOKEN`).
    #[serde(default)]
    pub github_token: Option<String>,
    /// Checkout directory the config path is relative to (`GITHUB_WORKSPACE`).
    #[serde(default)]
    pub github_workspace: Option<PathBuf>,
    /// Name of the triggering event (`GITHUB_EVENT_NAME`).
    #[serde(default)]
    pub github_event_name: Option<String>,
    /// Path to the JSON webhook payload (`GITHUB_EVENT_PATH`).
    #[serde(default)]
    pub github_event_path: Option<PathBuf>,
    /// `owner/name` of the repository (`GITHUB_REPOSITORY`).
    #[serde(default)]
    pub github_repository: Option<String>,
    /// REST API root, set on GitHub Enterprise Server (`GITHUB_API_URL`).
    #[serde(default)]
    pub github_api_url: Option<String>,
}

impl Config {
    /// Load from the process environment, layered under `explicit_path` when given.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        Self::load_from(std::env::vars(), explicit_path)
    }

    /// Load from an explicit set of variables instead of the process environment.
    pub fn load_from<I>(vars: I, explicit_path: Option<&Path>) -> Res<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().filter(|(key, _)| ENV_KEYS.contains(&key.as_str())).collect();

        let mut cfg = config::Config::builder().add_source(config::Environment::default().ignore_empty(true).source(Some(vars)));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        Ok(result)
    }

    /// The API token: the `repo-token` input, falling back to `GITHUB_TOKEN`.
    pub fn token(&self) -> Res<&str> {
        non_empty(&self.repo_token)
            .or_else(|| non_empty(&self.github_token))
            .ok_or_else(|| anyhow!("GitHub token not supplied (set `repo-token` or pass GITHUB_TOKEN)"))
    }

    /// The repository config path: the `config-path` input, falling back to the default.
    pub fn config_path(&self) -> &str {
        non_empty(&self.config_path).unwrap_or(DEFAULT_CONFIG_PATH)
    }

    /// The directory the repository config path is resolved against.
    pub fn workspace(&self) -> &Path {
        self.github_workspace.as_deref().unwrap_or(Path::new(""))
    }

    /// The name of the triggering event (`GITHUB_EVENT_NAME`).
    pub fn event_name(&self) -> Res<&str> {
        non_empty(&self.github_event_name).ok_or_else(|| anyhow!("GITHUB_EVENT_NAME is not set; is this running inside a workflow?"))
    }

    /// Where the runner wrote the event payload (`GITHUB_EVENT_PATH`).
    pub fn event_path(&self) -> Option<&Path> {
        self.github_event_path.as_deref()
    }

    /// The repository the workflow runs in (`GITHUB_REPOSITORY`).
    pub fn repo(&self) -> Res<RepoId> {
        non_empty(&self.github_repository)
            .ok_or_else(|| anyhow!("GITHUB_REPOSITORY is not set."))?
            .parse::<RepoId>()
            .context("Failed to read the repository from GITHUB_REPOSITORY")
    }

    /// The REST API root, when one is set (GitHub Enterprise Server).
    pub fn api_url(&self) -> Option<&str> {
        non_empty(&self.github_api_url)
    }
}

/// Inputs are trimmed, and blank values count as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
