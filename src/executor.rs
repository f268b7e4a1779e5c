//! Parallel filter execution
//!
//! Each chunk is filtered on its own worker thread. The pool is built per run
//! with one thread per chunk and dropped when the run ends. Results come back
//! in chunk order through rayon's indexed collect, and each outcome also
//! carries its chunk index so the aggregator can place it without relying on
//! that.

use crate::error::Result;
use crate::partition::Chunk;
use crate::progress::RunStats;
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Result of filtering one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    /// Index of the chunk this outcome belongs to
    pub index: usize,
    /// Kept entries, in chunk order
    pub kept: Vec<&'a str>,
    /// Number of entries of the chunk the predicate rejected
    pub rejected: usize,
}

/// Filter a single chunk in order
pub fn filter_chunk<'a, S, P>(chunk: &Chunk<'a, S>, predicate: &P) -> FilterOutcome<'a>
where
    S: AsRef<str>,
    P: Fn(&str) -> bool + ?Sized,
{
    let entries: &'a [S] = chunk.entries;
    let kept: Vec<&'a str> = entries
        .iter()
        .map(|entry| entry.as_ref())
        .filter(|&entry| predicate(entry))
        .collect();
    let rejected = entries.len() - kept.len();

    FilterOutcome {
        index: chunk.index,
        kept,
        rejected,
    }
}

/// Runs the compiled predicate over chunks concurrently
pub struct Executor<'r> {
    stats: &'r RunStats,
    progress: ProgressBar,
}

impl<'r> Executor<'r> {
    pub fn new(stats: &'r RunStats) -> Self {
        Self {
            stats,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report finished chunks on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Filter every chunk, returning one outcome per chunk in chunk order
    pub fn run<'a, S, P>(
        &self,
        chunks: &[Chunk<'a, S>],
        predicate: &P,
    ) -> Result<Vec<FilterOutcome<'a>>>
    where
        S: AsRef<str> + Sync,
        P: Fn(&str) -> bool + Sync + ?Sized,
    {
        if chunks.is_empty() {
            self.progress.finish_and_clear();
            return Ok(Vec::new());
        }

        self.stats.add_chunks(chunks.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(chunks.len())
            .thread_name(|i| format!("comply-worker-{}", i))
            .build()?;

        log::debug!(
            "Filtering {} chunk(s) on {} worker(s)",
            chunks.len(),
            pool.current_num_threads()
        );

        let outcomes = pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| {
                    let outcome = filter_chunk(chunk, predicate);
                    self.stats
                        .record_chunk(outcome.kept.len() as u64, outcome.rejected as u64);
                    self.progress.inc(1);
                    log::trace!(
                        "Chunk {} done: {} kept, {} rejected",
                        outcome.index,
                        outcome.kept.len(),
                        outcome.rejected
                    );
                    outcome
                })
                .collect::<Vec<_>>()
        });

        self.progress.finish_and_clear();

        Ok(outcomes)
    }
}
