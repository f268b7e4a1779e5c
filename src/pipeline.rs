//! Filtering pipeline
//!
//! Ties the core together: compile the policy once, partition the input,
//! filter the chunks in parallel and merge the outcomes back in input order.

use crate::aggregate::merge;
use crate::compiler::{compile, Advisory, CompiledPolicy};
use crate::error::Result;
use crate::executor::Executor;
use crate::partition::partition;
use crate::policy::PolicySpec;
use crate::progress::{create_chunk_progress_bar, RunStats};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport<'a> {
    /// Kept entries, in input order
    pub entries: Vec<&'a str>,
    /// Number of rejected entries
    pub rejected: usize,
    /// Advisories raised during the run, one per kind
    pub advisories: Vec<Advisory>,
}

impl FilterReport<'_> {
    pub fn kept(&self) -> usize {
        self.entries.len()
    }
}

/// Compiled policy plus worker configuration for one run
pub struct FilterPipeline {
    policy: CompiledPolicy,
    workers: NonZeroUsize,
    stats: Arc<RunStats>,
    show_progress: bool,
}

impl FilterPipeline {
    pub fn new(spec: &PolicySpec, workers: NonZeroUsize) -> Self {
        Self {
            policy: compile(spec),
            workers,
            stats: Arc::new(RunStats::new()),
            show_progress: false,
        }
    }

    /// Draw a chunk progress bar on stderr while filtering
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Filter `entries`, keeping their order
    pub fn run<'a, S>(&self, entries: &'a [S]) -> Result<FilterReport<'a>>
    where
        S: AsRef<str> + Sync,
    {
        let bytes: usize = entries.iter().map(|e| e.as_ref().len()).sum();
        self.stats.add_input(entries.len() as u64, bytes as u64);

        let chunks = partition(entries, self.workers);
        log::info!(
            "Filtering {} entries against {} constraint(s) in {} chunk(s) ({} worker(s) requested)",
            entries.len(),
            self.policy.len(),
            chunks.len(),
            self.workers
        );

        let mut executor = Executor::new(&self.stats);
        if self.show_progress {
            executor = executor.with_progress(create_chunk_progress_bar(chunks.len() as u64, "Filtering..."));
        }

        let policy = &self.policy;
        let outcomes = executor.run(&chunks, &|entry: &str| policy.matches(entry))?;
        let merged = merge(outcomes);

        // Reported once per run, after every worker has finished
        let advisories: Vec<Advisory> = self.policy.advisories().collect();
        for advisory in &advisories {
            log::warn!("{}", advisory);
        }

        log::info!("Kept {} entries, rejected {}", merged.entries.len(), merged.rejected);

        Ok(FilterReport {
            entries: merged.entries,
            rejected: merged.rejected,
            advisories,
        })
    }

    /// Get run statistics
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }
}

/// Filter `entries` against `spec` with `workers` workers
pub fn filter_entries<'a, S>(
    entries: &'a [S],
    spec: &PolicySpec,
    workers: NonZeroUsize,
) -> Result<FilterReport<'a>>
where
    S: AsRef<str> + Sync,
{
    FilterPipeline::new(spec, workers).run(entries)
}
