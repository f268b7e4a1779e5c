//! Command-line interface definition for comply
//!
//! Provides argument parsing and conversion into policy options.

use crate::error::ConflictError;
use crate::input::InputSource;
use crate::output::OutputTarget;
use crate::policy::PolicyOptions;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Filter password wordlists down to entries that comply with a password policy
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "comply",
    author = "m0h1nd4",
    version,
    about = "Filter password wordlists by password policy",
    long_about = r#"
Reduce a wordlist to the entries that satisfy a password policy: the default
Windows complexity rule, length bounds, uppercase counts, required prefixes or
suffixes, and required or forbidden characters. Input order is preserved.

EXAMPLES:
    # Keep entries meeting the Windows default complexity rule
    comply -p wordlist.txt -d

    # Same, but reject entries containing user or company names
    comply -p wordlist.txt -d -n "jsmith,acme"

    # Length 8 to 12, at least 2 uppercase, 4 threads
    comply -p wordlist.txt --min-length 8 --max-length 12 -u 2 -t 4

    # Entries starting with "summer" and containing '!' or '@'
    cat wordlist.txt | comply --stdin --starts-with summer -i '!,@'

    # Entries containing both 'a' and '1' but no spaces, to a file
    comply -p wordlist.txt --include-exclusive a,1 -e ' ' -o filtered.txt
"#
)]
pub struct Args {
    /// Apply the default Windows password complexity rules (compatible with other filters)
    #[arg(short = 'd', long = "default", default_value_t = false)]
    pub default_policy: bool,

    /// Names that disqualify an entry under the default policy (comma separated)
    #[arg(short = 'n', long, value_name = "NAMES", value_delimiter = ',')]
    pub names: Vec<String>,

    /// Wordlist to filter
    #[arg(short = 'p', long, value_name = "FILE", conflicts_with = "stdin", required_unless_present = "stdin")]
    pub path: Option<PathBuf>,

    /// Read the wordlist from standard input
    #[arg(long, default_value_t = false)]
    pub stdin: bool,

    /// Output file for the filtered wordlist (default: standard output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum entry length
    #[arg(long, value_name = "NUM")]
    pub min_length: Option<usize>,

    /// Maximum entry length
    #[arg(long, value_name = "NUM")]
    pub max_length: Option<usize>,

    /// Exact entry length
    #[arg(short = 'l', long, value_name = "NUM")]
    pub length: Option<usize>,

    /// Minimum number of uppercase characters
    #[arg(short = 'u', long, value_name = "NUM")]
    pub uppercase: Option<usize>,

    /// Only keep entries starting with this string
    #[arg(long, value_name = "STRING")]
    pub starts_with: Option<String>,

    /// Only keep entries ending with this string
    #[arg(long, value_name = "STRING")]
    pub ends_with: Option<String>,

    /// Compare --starts-with and --ends-with with exact case
    #[arg(long, default_value_t = false)]
    pub case_sensitive: bool,

    /// Reject entries containing any of these characters (comma separated)
    #[arg(short = 'e', long, value_name = "CHARS", value_delimiter = ',')]
    pub exclude: Vec<char>,

    /// Keep only entries containing at least one of these characters (comma separated)
    #[arg(short = 'i', long, value_name = "CHARS", value_delimiter = ',')]
    pub include: Vec<char>,

    /// Keep only entries containing all of these characters (comma separated)
    #[arg(long, value_name = "CHARS", value_delimiter = ',')]
    pub include_exclusive: Vec<char>,

    /// Number of threads
    #[arg(short = 't', long, value_name = "NUM", default_value_t = 1)]
    pub threads: usize,

    /// Display statistics after filtering
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Quiet mode - only errors and warnings
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Raw policy options from the filter flags
    pub fn policy_options(&self) -> PolicyOptions {
        PolicyOptions {
            default_policy: self.default_policy,
            names: self.names.clone(),
            length: self.length,
            min_length: self.min_length,
            max_length: self.max_length,
            min_uppercase: self.uppercase,
            starts_with: self.starts_with.clone(),
            ends_with: self.ends_with.clone(),
            case_sensitive: self.case_sensitive,
            exclude: self.exclude.clone(),
            include: self.include.clone(),
            include_exclusive: self.include_exclusive.clone(),
        }
    }

    /// Worker count, at least one
    pub fn workers(&self) -> Result<NonZeroUsize, ConflictError> {
        NonZeroUsize::new(self.threads).ok_or(ConflictError::NoWorkers)
    }

    /// Where to read the wordlist from
    pub fn input_source(&self) -> anyhow::Result<InputSource> {
        match (&self.path, self.stdin) {
            (Some(path), false) => Ok(InputSource::File(path.clone())),
            (None, true) => Ok(InputSource::Stdin),
            _ => anyhow::bail!("You must specify exactly one of --stdin or --path"),
        }
    }

    /// Where to write the filtered wordlist
    pub fn output_target(&self) -> OutputTarget {
        match &self.output {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        }
    }
}
