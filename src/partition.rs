//! Work partitioning
//!
//! Splits the materialized input into contiguous, ordered chunks, one per
//! worker. Concatenating the chunks in order gives back the input.

use std::num::NonZeroUsize;

/// A contiguous slice of the input assigned to one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a, T> {
    /// Position of this chunk in the input
    pub index: usize,
    pub entries: &'a [T],
}

/// Chunk size for `len` entries over `workers` workers: `ceil(len / workers)`
pub fn chunk_size(len: usize, workers: NonZeroUsize) -> usize {
    len.div_ceil(workers.get())
}

/// Split `entries` into at most `workers` ordered chunks
///
/// Produces `ceil(len / chunk_size)` chunks, which is fewer than `workers`
/// when the input does not divide evenly or is smaller than the worker
/// count. Empty input produces no chunks.
pub fn partition<T>(entries: &[T], workers: NonZeroUsize) -> Vec<Chunk<'_, T>> {
    let size = chunk_size(entries.len(), workers);
    if size == 0 {
        return Vec::new();
    }

    entries
        .chunks(size)
        .enumerate()
        .map(|(index, entries)| Chunk { index, entries })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_chunk_size() {
        assert_eq!(chunk_size(10, workers(3)), 4);
        assert_eq!(chunk_size(9, workers(3)), 3);
        assert_eq!(chunk_size(3, workers(10)), 1);
        assert_eq!(chunk_size(0, workers(4)), 0);
    }

    #[test]
    fn test_uneven_split() {
        let entries: Vec<u32> = (0..10).collect();
        let chunks = partition(&entries, workers(3));

        let sizes: Vec<_> = chunks.iter().map(|c| c.entries.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_fewer_chunks_than_workers() {
        // 5 entries over 4 workers: chunk size 2, only 3 chunks
        let entries: Vec<u32> = (0..5).collect();
        assert_eq!(partition(&entries, workers(4)).len(), 3);

        let entries = ["a", "b", "c"];
        let chunks = partition(&entries, workers(10));
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.entries.len() == 1));
    }

    #[test]
    fn test_single_worker() {
        let entries = ["a", "b", "c"];
        let chunks = partition(&entries, workers(1));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].entries, &entries[..]);
    }

    #[test]
    fn test_empty_input() {
        let entries: [&str; 0] = [];
        assert!(partition(&entries, workers(4)).is_empty());
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let entries: Vec<String> = (0..97).map(|i| format!("word{}", i)).collect();

        for n in [1, 2, 7, 96, 97, 200] {
            let rebuilt: Vec<&String> = partition(&entries, workers(n))
                .iter()
                .flat_map(|c| c.entries.iter())
                .collect();
            assert_eq!(rebuilt, entries.iter().collect::<Vec<_>>());
        }
    }
}
