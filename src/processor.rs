//! Run orchestration
//!
//! Reads the wordlist, runs the filtering pipeline and writes the result.

use crate::cli::Args;
use crate::input::{check_readable, read_source, InputSource};
use crate::output::{write_entries, OutputTarget};
use crate::pipeline::FilterPipeline;
use crate::policy::PolicySpec;
use crate::progress::{print_section, print_status, RunStats, Status};

use std::num::NonZeroUsize;
use std::sync::Arc;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub spec: PolicySpec,
    pub workers: NonZeroUsize,
    pub input: InputSource,
    pub output: OutputTarget,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    /// Validate arguments and build the run configuration
    ///
    /// Conflicting options are reported here, before any input is read.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let input = args.input_source()?;
        let spec = PolicySpec::try_from(args.policy_options())?;
        let workers = args.workers()?;

        if let InputSource::File(path) = &input {
            check_readable(path)?;
        }

        Ok(Self {
            spec,
            workers,
            input,
            output: args.output_target(),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub kept: usize,
    pub rejected: usize,
    pub written_to: OutputTarget,
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Read, filter and write the wordlist
    pub fn process(&self) -> anyhow::Result<RunSummary> {
        let entries = read_source(&self.config.input)?;
        log::debug!("Read {} entries from {}", entries.len(), self.config.input);

        self.process_entries(&entries)
    }

    /// Filter already materialized entries and write the result
    pub fn process_entries<S>(&self, entries: &[S]) -> anyhow::Result<RunSummary>
    where
        S: AsRef<str> + Sync,
    {
        let pipeline = FilterPipeline::new(&self.config.spec, self.config.workers)
            .with_progress(self.config.verbose && !self.config.quiet);

        let report = pipeline.run(entries)?;
        let (written_to, _) = write_entries(&self.config.output, report.entries.iter().copied())?;
        if written_to != self.config.output {
            print_status(
                Status::Warning,
                &format!(
                    "Cannot write to {}, the wordlist was written to {} instead",
                    self.config.output, written_to
                ),
            );
        }

        let summary = RunSummary {
            kept: report.kept(),
            rejected: report.rejected,
            written_to,
        };

        if self.config.verbose && !self.config.quiet {
            self.print_report(&summary, &pipeline.stats());
        }

        Ok(summary)
    }

    fn print_report(&self, summary: &RunSummary, stats: &Arc<RunStats>) {
        print_section("Result");
        print_status(
            Status::Info,
            &format!("{} entries from {} were removed.", summary.rejected, self.config.input),
        );
        print_status(
            Status::Success,
            &format!("Wordlist {} contains {}.", summary.written_to, summary.kept),
        );
        stats.print_summary();
    }

    /// Print configuration summary
    pub fn print_config(&self) {
        let spec = &self.config.spec;
        let info = |text: String| print_status(Status::Info, &text);
        let item = |text: String| print_status(Status::Item, &text);
        print_section("Configuration");

        info(format!("Input:        {}", self.config.input));
        info(format!("Output:       {}", self.config.output));
        info(format!("Threads:      {}", self.config.workers));

        if let Some(names) = spec.default_policy() {
            item(format!("Default policy (excluded names: {:?})", names));
        }
        if spec.length().is_set() {
            item(format!("Length:       {:?}", spec.length()));
        }
        if let Some(min) = spec.min_uppercase() {
            item(format!("Uppercase:    >= {}", min));
        }
        if let Some(prefix) = spec.starts_with() {
            item(format!("Starts with:  {:?} ({:?})", prefix, spec.affix_case()));
        }
        if let Some(suffix) = spec.ends_with() {
            item(format!("Ends with:    {:?} ({:?})", suffix, spec.affix_case()));
        }
        if !spec.excluded().is_empty() {
            item(format!("Excluded:     {:?}", spec.excluded()));
        }
        item(format!("Inclusion:    {:?}", spec.inclusion()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConflictError;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn args(list: &[&str]) -> Args {
        use clap::Parser;
        Args::try_parse_from(std::iter::once("comply").chain(list.iter().copied())).unwrap()
    }

    #[test]
    fn test_file_to_file() {
        let mut input = NamedTempFile::new().unwrap();
        for line in ["Password1!", "abc", "LongPassword123$", "short1"] {
            writeln!(input, "{}", line).unwrap();
        }
        let out_dir = TempDir::new().unwrap();
        let out_path = out_dir.path().join("filtered.txt");

        let args = args(&[
            "-p",
            input.path().to_str().unwrap(),
            "-d",
            "-t",
            "4",
            "-o",
            out_path.to_str().unwrap(),
            "-q",
        ]);
        let summary = Processor::new(ProcessorConfig::from_args(&args).unwrap())
            .process()
            .unwrap();

        assert_eq!(summary.kept, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(summary.written_to, OutputTarget::File(out_path.clone()));
        assert_eq!(
            std::fs::read_to_string(&out_path).unwrap(),
            "Password1!\nLongPassword123$\n"
        );
    }

    #[test]
    fn test_conflict_detected_before_reading() {
        let args = args(&["-p", "/definitely/not/here.txt", "-l", "8", "--min-length", "6"]);

        let err = ProcessorConfig::from_args(&args).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConflictError>(),
            Some(&ConflictError::ExactWithBounds)
        );
    }

    #[test]
    fn test_unreadable_path() {
        let args = args(&["-p", "/definitely/not/here.txt", "-d"]);
        assert!(ProcessorConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_include_conflict() {
        let args = args(&["--stdin", "-i", "a", "--include-exclusive", "b"]);

        let err = ProcessorConfig::from_args(&args).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConflictError>(),
            Some(&ConflictError::IncludeWithIncludeExclusive)
        );
    }
}
