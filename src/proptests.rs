//! Property-based tests for the filtering pipeline.
//!
//! These tests use proptest to verify, for arbitrary wordlists and policies:
//! - Output order matches a single-threaded, entry-by-entry filter
//! - Kept plus rejected entries add up to the input size
//! - Results do not depend on the worker count

use crate::compiler::compile;
use crate::partition::partition;
use crate::pipeline::filter_entries;
use crate::policy::{PolicyOptions, PolicySpec};
use proptest::prelude::*;
use std::num::NonZeroUsize;

// ============================================================================
// Strategies
// ============================================================================

/// Entries mixing all character classes, spaces and empty lines
fn arb_entry() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-cA-CxyzÉé0-9!@ ]{0,14}").unwrap()
}

fn arb_entries() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_entry(), 0..60)
}

fn arb_chars(pool: &'static str) -> impl Strategy<Value = Vec<char>> {
    prop::sample::subsequence(pool.chars().collect::<Vec<_>>(), 0..=3)
}

/// Policies that never conflict: required characters come from "abc!",
/// excluded ones from "xyz@", affixes are at most 2 characters and every
/// exact or maximum length is at least 2.
fn arb_spec() -> impl Strategy<Value = PolicySpec> {
    let lengths = (
        any::<bool>(),
        prop::option::of(2usize..12),
        prop::option::of(0usize..8),
        prop::option::of(2usize..12),
        prop::option::of(0usize..=2),
    );
    let characters = (
        prop::option::of("[a-cA-C]{0,2}"),
        prop::option::of("[a-c!]{0,2}"),
        any::<bool>(),
        arb_chars("xyz@"),
        arb_chars("abc!"),
        any::<bool>(),
    );

    (lengths, characters)
        .prop_map(
            |(
                (default_policy, exact, min, extra, uppercase),
                (starts_with, ends_with, case_sensitive, exclude, required, all_of),
            )| {
                // an exact length replaces both bounds
                let (length, min_length, max_length) = match exact {
                    Some(n) => (Some(n), None, None),
                    None => (None, min, extra.map(|extra| min.unwrap_or(0) + extra)),
                };
                let (include, include_exclusive) = if all_of {
                    (Vec::new(), required)
                } else {
                    (required, Vec::new())
                };

                PolicySpec::try_from(PolicyOptions {
                    default_policy,
                    names: vec!["abc".to_string()],
                    length,
                    min_length,
                    max_length,
                    min_uppercase: uppercase,
                    starts_with,
                    ends_with,
                    case_sensitive,
                    exclude,
                    include,
                    include_exclusive,
                })
                .unwrap()
            },
        )
}

fn workers(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn output_matches_sequential_filter(
        entries in arb_entries(),
        spec in arb_spec(),
        n in 1usize..16,
    ) {
        let policy = compile(&spec);
        let expected: Vec<&str> = entries
            .iter()
            .map(String::as_str)
            .filter(|e| policy.matches(e))
            .collect();

        let report = filter_entries(&entries, &spec, workers(n)).unwrap();

        prop_assert_eq!(report.entries, expected);
    }

    #[test]
    fn kept_plus_rejected_is_input_size(
        entries in arb_entries(),
        spec in arb_spec(),
        n in 1usize..16,
    ) {
        let report = filter_entries(&entries, &spec, workers(n)).unwrap();

        prop_assert_eq!(report.kept() + report.rejected, entries.len());
    }

    #[test]
    fn worker_count_does_not_change_result(entries in arb_entries(), spec in arb_spec()) {
        let single = filter_entries(&entries, &spec, workers(1)).unwrap();

        for n in [2, entries.len() + 5] {
            let report = filter_entries(&entries, &spec, workers(n)).unwrap();
            prop_assert_eq!(&report.entries, &single.entries);
            prop_assert_eq!(report.rejected, single.rejected);
        }
    }

    #[test]
    fn partition_is_contiguous_and_bounded(entries in arb_entries(), n in 1usize..80) {
        let chunks = partition(&entries, workers(n));

        prop_assert!(chunks.len() <= n);
        let rebuilt: Vec<&String> = chunks.iter().flat_map(|c| c.entries.iter()).collect();
        prop_assert_eq!(rebuilt, entries.iter().collect::<Vec<_>>());
        for (index, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, index);
            prop_assert!(!chunk.entries.is_empty());
        }
    }
}
