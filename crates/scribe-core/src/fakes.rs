//! In-memory fakes for the collaborator traits (testing only)
//!
//! Provides `MemoryReleaseSource`, `StaticCompletionBackend`, and
//! `FailingCompletionBackend` that satisfy the trait contracts without any
//! network access, recording calls so tests can assert what the pipeline
//! did — and did not — do.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{BackendError, SourceError};
use crate::release::{ReleaseRecord, ReleaseUpdate, RepoSlug};
use crate::source_traits::{
    BackendResult, CompletionBackend, ReleaseSource, SourceResult,
};
use crate::synthesis::{SynthesisRequest, SynthesisResult};

// ---------------------------------------------------------------------------
// MemoryReleaseSource
// ---------------------------------------------------------------------------

/// In-memory release source seeded with a fixed newest-first list.
///
/// Updates are recorded rather than applied; failures can be injected for
/// either operation.
#[derive(Debug, Default)]
pub struct MemoryReleaseSource {
    releases: Vec<ReleaseRecord>,
    updates: Mutex<Vec<(u64, ReleaseUpdate)>>,
    fail_listing: Option<String>,
    fail_update: Option<String>,
}

impl MemoryReleaseSource {
    /// Create a source that will return the given releases, in order.
    pub fn new(releases: Vec<ReleaseRecord>) -> Self {
        MemoryReleaseSource {
            releases,
            ..Default::default()
        }
    }

    /// Make `list_releases` fail with the given transport message.
    pub fn with_listing_failure(mut self, message: &str) -> Self {
        self.fail_listing = Some(message.to_string());
        self
    }

    /// Make `update_release` fail with the given transport message.
    pub fn with_update_failure(mut self, message: &str) -> Self {
        self.fail_update = Some(message.to_string());
        self
    }

    /// All updates issued so far, as `(release_id, update)` pairs.
    pub fn updates(&self) -> Vec<(u64, ReleaseUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    /// Number of update calls issued.
    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl ReleaseSource for MemoryReleaseSource {
    async fn list_releases(&self, _repo: &RepoSlug) -> SourceResult<Vec<ReleaseRecord>> {
        if let Some(message) = &self.fail_listing {
            return Err(SourceError::Http(message.clone()));
        }
        Ok(self.releases.clone())
    }

    async fn update_release(
        &self,
        _repo: &RepoSlug,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> SourceResult<ReleaseRecord> {
        if let Some(message) = &self.fail_update {
            return Err(SourceError::Http(message.clone()));
        }
        self.updates
            .lock()
            .unwrap()
            .push((release_id, update.clone()));

        let mut updated = self
            .releases
            .iter()
            .find(|r| r.id == release_id)
            .cloned()
            .unwrap_or_else(|| ReleaseRecord::new(release_id, ""));
        updated.body = Some(update.body.clone());
        updated.draft = update.draft;
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// Completion backends
// ---------------------------------------------------------------------------

/// Completion backend that always replies with a fixed body, recording
/// every request it receives.
#[derive(Debug, Default)]
pub struct StaticCompletionBackend {
    reply: String,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl StaticCompletionBackend {
    pub fn new(reply: &str) -> Self {
        StaticCompletionBackend {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completion calls received.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for StaticCompletionBackend {
    async fn complete(&self, request: &SynthesisRequest) -> BackendResult<SynthesisResult> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(SynthesisResult {
            body: self.reply.clone(),
        })
    }
}

/// Completion backend that always fails, for exercising the abort path.
#[derive(Debug)]
pub struct FailingCompletionBackend {
    error: fn(&str) -> BackendError,
    message: String,
}

impl FailingCompletionBackend {
    /// Fail every call with an API error carrying the given message.
    pub fn rejecting_auth(message: &str) -> Self {
        FailingCompletionBackend {
            error: |m| BackendError::Api {
                status: 401,
                message: m.to_string(),
            },
            message: message.to_string(),
        }
    }

    /// Fail every call with a transport error.
    pub fn unreachable(message: &str) -> Self {
        FailingCompletionBackend {
            error: |m| BackendError::Http(m.to_string()),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl CompletionBackend for FailingCompletionBackend {
    async fn complete(&self, _request: &SynthesisRequest) -> BackendResult<SynthesisResult> {
        Err((self.error)(&self.message))
    }
}
