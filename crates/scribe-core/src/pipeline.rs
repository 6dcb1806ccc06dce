//! Pipeline orchestration: fetch, filter, select, synthesize, write back.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::policy::{filter_releases, select_candidate};
use crate::release::ReleaseUpdate;
use crate::source_traits::{CompletionBackend, ReleaseSource};
use crate::synthesis::SynthesisRequest;

/// Stages of one pipeline run, in execution order.
///
/// Transitions are strictly forward: `Fetching → Filtering → Selecting →
/// Synthesizing → WritingBack → Done`, with the `Failed` sink reachable
/// from every stage except `Done`. Used for structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    Filtering,
    Selecting,
    Synthesizing,
    WritingBack,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Fetching => "fetching",
            PipelineStage::Filtering => "filtering",
            PipelineStage::Selecting => "selecting",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::WritingBack => "writing_back",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Terminal result of a successful run.
///
/// Created once per invocation; never retried or merged with a prior
/// run's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Tag name of the processed release.
    pub release: String,

    /// Identifier of the processed release, as text.
    pub id: String,

    /// The synthesized replacement body.
    pub description: String,
}

/// The annotation pipeline orchestrator.
pub struct NotesPipeline;

impl NotesPipeline {
    /// Run one annotation pass: at most one listing call, one completion
    /// call, and one update call, strictly in sequence.
    ///
    /// The write-back is awaited; its failure is pipeline failure, so a
    /// success outcome is only produced after the source has acknowledged
    /// the update.
    pub async fn run(
        source: Arc<dyn ReleaseSource>,
        backend: Arc<dyn CompletionBackend>,
        config: &PipelineConfig,
    ) -> Result<PipelineOutcome, PipelineError> {
        match Self::execute(source, backend, config).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(stage = %PipelineStage::Failed, error = %err, "pipeline aborted");
                Err(err)
            }
        }
    }

    async fn execute(
        source: Arc<dyn ReleaseSource>,
        backend: Arc<dyn CompletionBackend>,
        config: &PipelineConfig,
    ) -> Result<PipelineOutcome, PipelineError> {
        debug!(stage = %PipelineStage::Fetching, repo = %config.repository, "listing releases");
        let releases = source.list_releases(&config.repository).await?;

        debug!(
            stage = %PipelineStage::Filtering,
            total = releases.len(),
            "applying exclusion policy"
        );
        let filtered = filter_releases(&releases, &config.excludes);

        debug!(stage = %PipelineStage::Selecting, eligible = filtered.len(), "selecting candidate");
        let candidate = select_candidate(&filtered)
            .ok_or(PipelineError::NoEligibleRelease)?
            .clone();

        info!(
            stage = %PipelineStage::Synthesizing,
            release = %candidate.tag_name,
            id = candidate.id,
            "rewriting release notes"
        );
        let request = SynthesisRequest::for_release(&candidate);
        let synthesized = backend.complete(&request).await?;

        info!(
            stage = %PipelineStage::WritingBack,
            release = %candidate.tag_name,
            id = candidate.id,
            "updating release"
        );
        let update = ReleaseUpdate::replacing_body(synthesized.body.clone());
        source
            .update_release(&config.repository, candidate.id, &update)
            .await?;

        info!(stage = %PipelineStage::Done, release = %candidate.tag_name, "release annotated");

        Ok(PipelineOutcome {
            release: candidate.tag_name,
            id: candidate.id.to_string(),
            description: synthesized.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_names() {
        assert_eq!(PipelineStage::Fetching.to_string(), "fetching");
        assert_eq!(PipelineStage::WritingBack.to_string(), "writing_back");
        assert_eq!(PipelineStage::Done.to_string(), "done");
        assert_eq!(PipelineStage::Failed.to_string(), "failed");
    }
}
