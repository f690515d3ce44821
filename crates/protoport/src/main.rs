use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;
mod paths;

use commands::{Commands, GlobalArgs};

#[derive(Parser)]
#[command(
    name = "protoport",
    version,
    about = "Generate protobuf bindings for every .proto file in a folder or GitHub repository"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { global, command } = Cli::parse();

    // RUST_LOG wins; otherwise warnings and errors, or everything with -v.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if global.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::select! {
        result = command.run(&global) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error::format_error(&err));
            ExitCode::FAILURE
        }
    }
}
