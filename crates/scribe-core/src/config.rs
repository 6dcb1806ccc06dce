//! Pipeline configuration.
//!
//! Built once at startup by the caller and threaded through explicitly;
//! nothing in the pipeline reads process environment ambiently.

use crate::policy::ExclusionPolicy;
use crate::release::RepoSlug;

/// Everything one invocation of the pipeline needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Repository whose latest release gets annotated.
    pub repository: RepoSlug,

    /// Credential for the release source.
    pub github_token: String,

    /// Credential for the completion backend.
    pub openai_api_key: String,

    /// Model identifier for the backend; the backend supplies its own
    /// default when unset.
    pub openai_model: Option<String>,

    /// Release states to skip when selecting a candidate.
    pub excludes: ExclusionPolicy,
}

impl PipelineConfig {
    /// Create a configuration with an empty exclusion policy.
    pub fn new(repository: RepoSlug, github_token: &str, openai_api_key: &str) -> Self {
        PipelineConfig {
            repository,
            github_token: github_token.to_string(),
            openai_api_key: openai_api_key.to_string(),
            openai_model: None,
            excludes: ExclusionPolicy::none(),
        }
    }

    /// Set the backend model identifier.
    pub fn with_model(mut self, model: &str) -> Self {
        self.openai_model = Some(model.to_string());
        self
    }

    /// Set the exclusion policy.
    pub fn with_excludes(mut self, excludes: ExclusionPolicy) -> Self {
        self.excludes = excludes;
        self
    }
}
