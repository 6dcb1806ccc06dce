//! Exclusion policy, filter, and candidate selection.
//!
//! All of this is pure: no I/O, no errors. The filter narrows the source's
//! newest-first release list to eligible candidates; the selector picks the
//! first survivor.

use std::collections::HashSet;

use crate::release::ReleaseRecord;

/// The set of release states to skip when selecting a candidate.
///
/// Recognized names are `prerelease` and `draft`. Unrecognized names are
/// kept in the set but match no predicate, so they are silently inert
/// rather than an error. Parsing the empty string yields a one-element set
/// containing the empty string, which likewise matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    names: HashSet<String>,
}

impl ExclusionPolicy {
    /// Empty policy: every release is eligible.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a comma-separated policy string, e.g. `"prerelease,draft"`.
    ///
    /// The input is trimmed as a whole and split on `,`; individual names
    /// are not trimmed.
    pub fn parse(input: &str) -> Self {
        ExclusionPolicy {
            names: input.trim().split(',').map(str::to_string).collect(),
        }
    }

    /// Whether prereleases are excluded.
    pub fn excludes_prerelease(&self) -> bool {
        self.names.contains("prerelease")
    }

    /// Whether drafts are excluded.
    pub fn excludes_draft(&self) -> bool {
        self.names.contains("draft")
    }
}

/// Narrow a newest-first release list to the eligible subsequence.
///
/// Input order is preserved; no re-sorting happens here.
pub fn filter_releases(
    releases: &[ReleaseRecord],
    policy: &ExclusionPolicy,
) -> Vec<ReleaseRecord> {
    releases
        .iter()
        .filter(|r| !(policy.excludes_prerelease() && r.prerelease))
        .filter(|r| !(policy.excludes_draft() && r.draft))
        .cloned()
        .collect()
}

/// Pick the newest eligible release: element 0 of the filtered list.
///
/// Returns `None` for an empty list; the pipeline turns that into its
/// fail-fast `NoEligibleRelease` outcome. There is no fallback to an older
/// release.
pub fn select_candidate(filtered: &[ReleaseRecord]) -> Option<&ReleaseRecord> {
    filtered.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_releases() -> Vec<ReleaseRecord> {
        vec![
            ReleaseRecord::new(3, "v3.0-rc.1").as_prerelease(),
            ReleaseRecord::new(2, "v2.1").as_draft(),
            ReleaseRecord::new(1, "v2.0").with_body("notes"),
        ]
    }

    #[test]
    fn test_empty_policy_is_identity() {
        let releases = sample_releases();
        let filtered = filter_releases(&releases, &ExclusionPolicy::none());
        assert_eq!(filtered, releases);
    }

    #[test]
    fn test_empty_string_policy_is_identity() {
        // "".split(',') yields [""], which matches no policy name.
        let policy = ExclusionPolicy::parse("");
        assert!(!policy.excludes_prerelease());
        assert!(!policy.excludes_draft());

        let releases = sample_releases();
        assert_eq!(filter_releases(&releases, &policy), releases);
    }

    #[test]
    fn test_excludes_prerelease() {
        let policy = ExclusionPolicy::parse("prerelease");
        let filtered = filter_releases(&sample_releases(), &policy);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| !r.prerelease));
    }

    #[test]
    fn test_excludes_draft_and_prerelease() {
        let policy = ExclusionPolicy::parse("prerelease,draft");
        let filtered = filter_releases(&sample_releases(), &policy);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].tag_name, "v2.0");
    }

    #[test]
    fn test_unrecognized_names_are_ignored() {
        let policy = ExclusionPolicy::parse("nightly,draft,bogus");
        assert!(policy.excludes_draft());
        assert!(!policy.excludes_prerelease());

        let filtered = filter_releases(&sample_releases(), &policy);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| !r.draft));
    }

    #[test]
    fn test_filter_preserves_order() {
        let releases = vec![
            ReleaseRecord::new(5, "v5"),
            ReleaseRecord::new(4, "v4").as_draft(),
            ReleaseRecord::new(3, "v3"),
            ReleaseRecord::new(2, "v2").as_draft(),
            ReleaseRecord::new(1, "v1"),
        ];
        let filtered = filter_releases(&releases, &ExclusionPolicy::parse("draft"));
        let tags: Vec<&str> = filtered.iter().map(|r| r.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["v5", "v3", "v1"]);
    }

    #[test]
    fn test_select_candidate_picks_newest() {
        let releases = sample_releases();
        let candidate = select_candidate(&releases).expect("candidate");
        assert_eq!(candidate.id, 3);
    }

    #[test]
    fn test_select_candidate_empty_is_none() {
        assert!(select_candidate(&[]).is_none());
    }
}
