//! dsu - batch text-file utility for URL/domain workflows
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use dsu::cli::Args;
use dsu::error::DsuError;
use dsu::processor::{Processor, RunConfig};
use dsu::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    let args = Args::parse();

    // RUST_LOG still wins over the flags
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        let code = e
            .downcast_ref::<DsuError>()
            .map(DsuError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    let config = RunConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let processor = Processor::new(config);
    processor.run(&args.command)?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &RunConfig) {
    print_header("Configuration");

    print_info(&format!("Mode:         {}", args.command.name()));
    print_info(&format!("Output dir:   {:?}", config.output_dir));
    print_info(&format!("Buffer size:  {}", bytesize::ByteSize(config.buffer_size as u64)));
}
