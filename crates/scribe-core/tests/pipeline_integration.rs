//! Integration tests for the annotation pipeline over in-memory fakes.

use std::sync::Arc;

use scribe_core::fakes::{
    FailingCompletionBackend, MemoryReleaseSource, StaticCompletionBackend,
};
use scribe_core::{
    ExclusionPolicy, NotesPipeline, PipelineConfig, PipelineError, ReleaseRecord, RepoSlug,
};

fn config(excludes: &str) -> PipelineConfig {
    let repo: RepoSlug = "acme/widget".parse().expect("slug");
    PipelineConfig::new(repo, "gh-token", "oa-key")
        .with_excludes(ExclusionPolicy::parse(excludes))
}

/// Test: single eligible release flows through to outputs and write-back.
#[tokio::test]
async fn test_successful_annotation() {
    let source = Arc::new(MemoryReleaseSource::new(vec![ReleaseRecord::new(1, "v2.0")
        .with_body("Fixed bug X. Added feature Y.")]));
    let backend = Arc::new(StaticCompletionBackend::new("## Polished notes"));

    let outcome = NotesPipeline::run(source.clone(), backend.clone(), &config(""))
        .await
        .expect("pipeline failed");

    assert_eq!(outcome.release, "v2.0");
    assert_eq!(outcome.id, "1");
    assert_eq!(outcome.description, "## Polished notes");

    // The backend saw the literal body.
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user(), "Fixed bug X. Added feature Y.");

    // The write-back was awaited: one update, body replaced, draft cleared.
    let updates = source.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, 1);
    assert_eq!(updates[0].1.body, "## Polished notes");
    assert!(!updates[0].1.draft);
}

/// Test: newest eligible release wins after excluded states are removed.
#[tokio::test]
async fn test_prerelease_excluded_falls_through_to_next() {
    let source = Arc::new(MemoryReleaseSource::new(vec![
        ReleaseRecord::new(3, "v3.0-rc.1").with_body("rc notes").as_prerelease(),
        ReleaseRecord::new(2, "v2.0").with_body("stable notes"),
        ReleaseRecord::new(1, "v1.0").with_body("old notes"),
    ]));
    let backend = Arc::new(StaticCompletionBackend::new("rewritten"));

    let outcome = NotesPipeline::run(source.clone(), backend, &config("prerelease"))
        .await
        .expect("pipeline failed");

    assert_eq!(outcome.release, "v2.0");
    assert_eq!(outcome.id, "2");
    assert_eq!(source.updates()[0].0, 2);
}

/// Test: everything filtered out fails fast with no synthesis or update.
#[tokio::test]
async fn test_no_eligible_release() {
    let source = Arc::new(MemoryReleaseSource::new(vec![
        ReleaseRecord::new(1, "v2.0").with_body("wip").as_draft()
    ]));
    let backend = Arc::new(StaticCompletionBackend::new("unused"));

    let err = NotesPipeline::run(source.clone(), backend.clone(), &config("draft"))
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(err, PipelineError::NoEligibleRelease));
    assert_eq!(err.to_string(), "No valid releases");
    assert_eq!(backend.call_count(), 0, "no synthesis call");
    assert_eq!(source.update_count(), 0, "no write-back");
}

/// Test: empty release list also yields NoEligibleRelease.
#[tokio::test]
async fn test_empty_release_list() {
    let source = Arc::new(MemoryReleaseSource::new(vec![]));
    let backend = Arc::new(StaticCompletionBackend::new("unused"));

    let err = NotesPipeline::run(source, backend, &config(""))
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(err, PipelineError::NoEligibleRelease));
}

/// Test: backend auth rejection surfaces as SynthesisFailed and no update
/// call is ever issued.
#[tokio::test]
async fn test_backend_auth_failure_aborts_before_write_back() {
    let source = Arc::new(MemoryReleaseSource::new(vec![
        ReleaseRecord::new(1, "v2.0").with_body("notes")
    ]));
    let backend = Arc::new(FailingCompletionBackend::rejecting_auth(
        "Incorrect API key provided",
    ));

    let err = NotesPipeline::run(source.clone(), backend, &config(""))
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(err, PipelineError::SynthesisFailed(_)));
    assert!(err.to_string().contains("Incorrect API key provided"));
    assert_eq!(source.update_count(), 0, "no update after failed synthesis");
}

/// Test: listing failure surfaces as SourceUnavailable.
#[tokio::test]
async fn test_listing_failure() {
    let source = Arc::new(
        MemoryReleaseSource::new(vec![]).with_listing_failure("connection reset by peer"),
    );
    let backend = Arc::new(StaticCompletionBackend::new("unused"));

    let err = NotesPipeline::run(source, backend.clone(), &config(""))
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    assert!(err.to_string().contains("connection reset by peer"));
    assert_eq!(backend.call_count(), 0);
}

/// Test: the awaited write-back's failure is pipeline failure even though
/// synthesis succeeded — no success outcome is reported.
#[tokio::test]
async fn test_write_back_failure_is_pipeline_failure() {
    let source = Arc::new(
        MemoryReleaseSource::new(vec![ReleaseRecord::new(1, "v2.0").with_body("notes")])
            .with_update_failure("503 upstream unavailable"),
    );
    let backend = Arc::new(StaticCompletionBackend::new("rewritten"));

    let err = NotesPipeline::run(source, backend.clone(), &config(""))
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    assert!(err.to_string().contains("503 upstream unavailable"));
    assert_eq!(backend.call_count(), 1, "synthesis did happen");
}

/// Test: a release with no body sends the literal string "null".
#[tokio::test]
async fn test_null_body_sent_literally() {
    let source = Arc::new(MemoryReleaseSource::new(vec![ReleaseRecord::new(1, "v2.0")]));
    let backend = Arc::new(StaticCompletionBackend::new("rewritten"));

    NotesPipeline::run(source, backend.clone(), &config(""))
        .await
        .expect("pipeline failed");

    assert_eq!(backend.requests()[0].user(), "null");
}
