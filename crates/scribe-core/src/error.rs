//! Error taxonomy for the annotation pipeline.
//!
//! Every failure is terminal: the pipeline has no retry or recovery path,
//! so each variant aborts the remainder of the run and is surfaced as the
//! invocation's single error with the originating message carried verbatim.

use thiserror::Error;

/// Errors from the release source (listing or updating releases).
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport failure (connection refused, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source answered with a non-success status.
    #[error("release source API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("release source response decode failed: {0}")]
    Decode(String),

    /// A repository coordinate did not parse as `"owner/name"`.
    #[error("invalid repository slug (expected \"owner/name\"): {0}")]
    InvalidRepository(String),
}

/// Errors from the text-generation backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport failure reaching the backend.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status (including rejected
    /// authentication).
    #[error("completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend returned no choices.
    #[error("completion response contained no choices")]
    EmptyCompletion,

    /// The response body could not be decoded.
    #[error("completion response decode failed: {0}")]
    Decode(String),
}

/// Terminal pipeline errors.
///
/// Exactly one of these is reported per failed invocation; no structured
/// outputs are emitted alongside a failure.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Listing or updating the release failed at the transport/auth layer.
    #[error("{0}")]
    SourceUnavailable(String),

    /// The exclusion policy removed every candidate, or none existed.
    #[error("No valid releases")]
    NoEligibleRelease,

    /// The backend call failed or returned an unusable response.
    #[error("{0}")]
    SynthesisFailed(String),
}

impl From<SourceError> for PipelineError {
    fn from(err: SourceError) -> Self {
        PipelineError::SourceUnavailable(err.to_string())
    }
}

impl From<BackendError> for PipelineError {
    fn from(err: BackendError) -> Self {
        PipelineError::SynthesisFailed(err.to_string())
    }
}
