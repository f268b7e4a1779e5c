//! comply - password policy wordlist filter
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use comply::cli::Args;
use comply::processor::{Processor, ProcessorConfig};
use comply::progress::{print_status, Status};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging, an explicit RUST_LOG wins
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args) {
        print_status(Status::Error, &format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_status(Status::Error, &format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ProcessorConfig::from_args(&args)?;
    let processor = Processor::new(config);

    if args.verbose && !args.quiet {
        processor.print_config();
    }

    processor.process()?;

    Ok(())
}
