//! `pgfilter`: inspect the computed column filters a catalog snapshot
//! produces, and resolve filter values into SQL.

mod commands;

use clap::Parser;
use std::{io, process::ExitCode};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "pgfilter", version, about)]
struct Arguments {
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging();

    match args.command.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

// Warnings and up unless RUST_LOG says otherwise; logs go to stderr so
// stdout stays valid JSON.
fn init_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
