//! # comply
//!
//! Parallel password wordlist filter.
//!
//! ## Features
//!
//! - **Default policy**: Windows password complexity rule (3 of 4 character
//!   classes, at least 6 characters, no excluded names)
//! - **Length filtering**: exact length or minimum/maximum bounds
//! - **Character rules**: minimum uppercase count, required prefix/suffix,
//!   excluded characters, required characters (any of / all of)
//! - **Parallel processing**: the wordlist is split into one contiguous chunk
//!   per worker; output keeps the input order for any worker count
//! - **Encoding detection**: input files are transcoded to UTF-8
//!
//! ## Usage
//!
//! ```bash
//! # Entries meeting the Windows default complexity rule
//! comply -p wordlist.txt -d
//!
//! # 8 to 12 characters, ending in a digit from stdin, 4 threads
//! cat wordlist.txt | comply --stdin --min-length 8 --max-length 12 -i 0,1,2,3,4,5,6,7,8,9 -t 4
//! ```
//!
//! ## Example
//!
//! ```rust
//! use comply::pipeline::filter_entries;
//! use comply::policy::{PolicyOptions, PolicySpec};
//! use std::num::NonZeroUsize;
//!
//! let spec = PolicySpec::try_from(PolicyOptions {
//!     default_policy: true,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let entries = ["Password1!", "abc", "LongPassword123$", "short1"];
//! let report = filter_entries(&entries, &spec, NonZeroUsize::new(4).unwrap()).unwrap();
//!
//! assert_eq!(report.entries, vec!["Password1!", "LongPassword123$"]);
//! assert_eq!(report.rejected, 2);
//! ```

pub mod aggregate;
pub mod cli;
pub mod complexity;
pub mod compiler;
pub mod error;
pub mod executor;
pub mod input;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod policy;
pub mod processor;
pub mod progress;

#[cfg(test)]
mod proptests;

pub use cli::Args;
pub use compiler::{compile, Advisory, CompiledPolicy};
pub use error::{ConflictError, Error, Result};
pub use pipeline::{filter_entries, FilterPipeline, FilterReport};
pub use policy::{PolicyOptions, PolicySpec};
pub use processor::{Processor, ProcessorConfig};
