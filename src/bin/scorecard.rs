//! scorecard CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use scorecard::cli::commands::{cmd_categories, cmd_evaluate, cmd_info, cmd_report, cmd_truth};
use scorecard::cli::parser::{Cli, Commands};

fn main() -> ExitCode {
    // Library diagnostics go to stderr; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorecard=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Commands::Evaluate(args) => cmd_evaluate(args),
        Commands::Report(args) => cmd_report(args),
        Commands::Truth(args) => cmd_truth(args),
        Commands::Categories(args) => cmd_categories(args),
        Commands::Info => cmd_info(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("ERROR: {}", message);
            ExitCode::FAILURE
        }
    }
}
