//! Collaborator trait definitions for the annotation pipeline.
//!
//! These traits define the two external boundaries:
//! - `ReleaseSource`: list and update releases in a remote repository
//! - `CompletionBackend`: turn a prompt pair into rewritten notes
//!
//! Both traits are async and backend-agnostic. In-memory fakes are provided
//! for testing via the `fakes` module; `scribe-github` and `scribe-openai`
//! supply the real clients.

use async_trait::async_trait;

use crate::error::{BackendError, SourceError};
use crate::release::{ReleaseRecord, ReleaseUpdate, RepoSlug};
use crate::synthesis::{SynthesisRequest, SynthesisResult};

/// Result type for release-source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type for completion-backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Remote repository release store.
///
/// Guarantees:
/// - `list_releases` returns releases newest first, as ordered by the
///   source; the pipeline relies on that order and never re-sorts.
/// - `update_release` is acknowledged before it returns: a successful
///   return means the source accepted the mutation.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// List the repository's releases, newest first.
    async fn list_releases(&self, repo: &RepoSlug) -> SourceResult<Vec<ReleaseRecord>>;

    /// Apply an update to one release and return the updated record.
    async fn update_release(
        &self,
        repo: &RepoSlug,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> SourceResult<ReleaseRecord>;
}

/// Text-generation backend that rewrites release notes.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit the two-turn exchange and return the generated body,
    /// extracted from the backend's first choice.
    async fn complete(&self, request: &SynthesisRequest) -> BackendResult<SynthesisResult>;
}
