//! Common types and aliases shared across the crate.

use std::{fmt, str::FromStr};

use anyhow::anyhow;

/// The crate-wide error type.
pub type Err = anyhow::Error;
/// A result carrying the crate-wide error.
pub type Res<T> = Result<T, Err>;
/// A result with no value.
pub type Void = Res<()>;

/// A repository coordinate (`owner/name`), as given by `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// The owning user or organization.
    pub owner: String,
    /// The repository name.
    pub name: String,
}

impl RepoId {
    /// Create a repository coordinate from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoId {
    type Err = Err;

    fn from_str(s: &str) -> Res<Self> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(Self::new(owner, name)),
            _ => Err(anyhow!("Invalid repository `{s}`; expected `owner/name`.")),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
