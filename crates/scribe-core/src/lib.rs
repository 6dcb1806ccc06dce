//! Scribe-Core: release-note annotation pipeline
//!
//! This crate provides the core of the release-scribe pipeline:
//! it selects the newest eligible release of a repository, rewrites its
//! notes through a chat-completion backend, and writes the polished notes
//! back to the release record.
//!
//! ## Key components
//!
//! - [`ReleaseSource`] / [`CompletionBackend`]: async collaborator traits
//!   for the remote repository and the text-generation backend
//! - [`filter_releases`] / [`select_candidate`]: pure candidate selection
//!   with an [`ExclusionPolicy`]
//! - [`SynthesisRequest`]: fixed-role prompt pair for note rewriting
//! - [`NotesPipeline`]: the strictly sequential orchestrator
//!
//! Concrete clients live in `scribe-github` and `scribe-openai`; in-memory
//! fakes for testing are provided via the `fakes` module.

mod config;
mod error;
pub mod fakes;
mod pipeline;
mod policy;
mod release;
pub mod source_traits;
mod synthesis;
mod telemetry;

pub use config::PipelineConfig;
pub use error::{BackendError, PipelineError, SourceError};
pub use pipeline::{NotesPipeline, PipelineOutcome, PipelineStage};
pub use policy::{filter_releases, select_candidate, ExclusionPolicy};
pub use release::{ReleaseRecord, ReleaseUpdate, RepoSlug};
pub use source_traits::{BackendResult, CompletionBackend, ReleaseSource, SourceResult};
pub use synthesis::{ChatMessage, ChatRole, SynthesisRequest, SynthesisResult};
pub use telemetry::init_tracing;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
