//! Merging chunk outcomes
//!
//! Each outcome goes into the slot of its chunk index before anything is
//! concatenated, so the merged output follows input order no matter in which
//! order outcomes arrive.

use crate::executor::FilterOutcome;

/// Kept entries of a whole run and the number of rejected entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Merged<'a> {
    pub entries: Vec<&'a str>,
    pub rejected: usize,
}

/// Merge chunk outcomes into one ordered sequence
///
/// # Panics
///
/// Panics if two outcomes share a chunk index or an index lies outside
/// `0..outcomes.len()`.
pub fn merge<'a, I>(outcomes: I) -> Merged<'a>
where
    I: IntoIterator<Item = FilterOutcome<'a>>,
{
    let outcomes: Vec<FilterOutcome<'a>> = outcomes.into_iter().collect();
    let mut slots: Vec<Option<FilterOutcome<'a>>> = vec![None; outcomes.len()];

    for outcome in outcomes {
        let index = outcome.index;
        let slot = slots
            .get_mut(index)
            .unwrap_or_else(|| panic!("chunk index {} out of range", index));
        assert!(slot.is_none(), "chunk {} reported twice", index);
        *slot = Some(outcome);
    }

    let mut merged = Merged {
        entries: Vec::with_capacity(slots.iter().flatten().map(|o| o.kept.len()).sum()),
        rejected: 0,
    };

    // n distinct in-range indices fill all n slots
    for outcome in slots.into_iter().flatten() {
        merged.entries.extend(outcome.kept);
        merged.rejected += outcome.rejected;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome<'a>(index: usize, kept: &[&'a str], rejected: usize) -> FilterOutcome<'a> {
        FilterOutcome {
            index,
            kept: kept.to_vec(),
            rejected,
        }
    }

    #[test]
    fn test_merge_in_index_order() {
        let merged = merge(vec![
            outcome(0, &["a", "b"], 1),
            outcome(1, &["c"], 0),
            outcome(2, &[], 3),
        ]);

        assert_eq!(merged.entries, vec!["a", "b", "c"]);
        assert_eq!(merged.rejected, 4);
    }

    #[test]
    fn test_merge_ignores_arrival_order() {
        let merged = merge(vec![
            outcome(2, &["e"], 0),
            outcome(0, &["a"], 2),
            outcome(1, &["c", "d"], 1),
        ]);

        assert_eq!(merged.entries, vec!["a", "c", "d", "e"]);
        assert_eq!(merged.rejected, 3);
    }

    #[test]
    fn test_merge_nothing() {
        assert_eq!(merge(Vec::new()), Merged::default());
    }

    #[test]
    #[should_panic(expected = "reported twice")]
    fn test_duplicate_index_panics() {
        merge(vec![outcome(0, &["a"], 0), outcome(0, &["b"], 0)]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_gap_in_indices_panics() {
        merge(vec![outcome(0, &["a"], 0), outcome(2, &["b"], 0)]);
    }
}
