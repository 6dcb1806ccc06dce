//! Release domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// A `"owner/name"` repository coordinate.
///
/// The inner fields are private so a slug can only be produced by parsing,
/// which guarantees both halves are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = SourceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(SourceError::InvalidRepository(s.to_string())),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A release record as returned by the source, newest first in listings.
///
/// Immutable for the duration of one pipeline run; unknown payload fields
/// are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Opaque release identifier assigned by the source.
    pub id: u64,

    /// Tag the release points at (e.g. "v2.0").
    pub tag_name: String,

    /// Display name of the release, if any.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text release notes. Absent or null bodies stay `None`.
    #[serde(default)]
    pub body: Option<String>,

    /// Whether the release is marked as a draft.
    #[serde(default)]
    pub draft: bool,

    /// Whether the release is marked as a prerelease.
    #[serde(default)]
    pub prerelease: bool,

    /// Web URL of the release page, if provided.
    #[serde(default)]
    pub html_url: Option<String>,

    /// When the underlying tag was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the release was published (null for drafts).
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl ReleaseRecord {
    /// Create a minimal release record.
    pub fn new(id: u64, tag_name: &str) -> Self {
        ReleaseRecord {
            id,
            tag_name: tag_name.to_string(),
            name: None,
            body: None,
            draft: false,
            prerelease: false,
            html_url: None,
            created_at: None,
            published_at: None,
        }
    }

    /// Set the release body.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Mark the release as a draft.
    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }

    /// Mark the release as a prerelease.
    pub fn as_prerelease(mut self) -> Self {
        self.prerelease = true;
        self
    }
}

/// The mutation applied to a release on write-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseUpdate {
    /// Replacement release notes.
    pub body: String,

    /// Draft state after the update. Always `false` for pipeline
    /// write-backs: un-drafting is an unconditional, named side effect of
    /// the coordinator, reasserted even when the release was never a draft.
    pub draft: bool,
}

impl ReleaseUpdate {
    /// Replace the release body and unconditionally clear the draft flag.
    pub fn replacing_body(body: String) -> Self {
        ReleaseUpdate { body, draft: false }
    }
}
