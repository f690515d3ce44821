pub mod basic;
pub mod config;
pub mod github;

use std::path::Path;

use anyhow::Context;
use clap::{Args, Subcommand};

use protoport_build::{Dispatcher, ProtocCompiler, WalkReport};
use protoport_core::TargetLanguage;

use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Compiler command, e.g. "protoc" or "buf protoc"
    #[arg(long, global = true)]
    pub protoc: Option<String>,
    /// Seconds a single compiler run may take before it is killed
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate code for the proto files of a GitHub repository
    Github(github::GithubArgs),
    /// Generate code for the proto files of a local folder
    #[command(alias = "local")]
    Basic(basic::BasicArgs),
    /// Inspect or create the config file
    Config(config::ConfigArgs),
    /// Print the version of protoport
    #[command(alias = "v")]
    Version,
}

impl Commands {
    pub async fn run(self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Commands::Github(args) => github::run(args, global).await,
            Commands::Basic(args) => basic::run(args, global).await,
            Commands::Config(args) => config::run(args),
            Commands::Version => {
                println!("protoport {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn lang_help() -> String {
    format!("Target language, one of: {}", TargetLanguage::supported_list())
}

fn protoc_compiler(config: &Config, global: &GlobalArgs) -> anyhow::Result<ProtocCompiler> {
    let command = config.protoc_command(global.protoc.as_deref());
    let compiler = ProtocCompiler::from_command(&command)?
        .with_timeout(config.protoc_timeout(global.timeout));
    Ok(compiler)
}

/// Compile `input` into `output`, reporting each file as it finishes.
async fn compile_tree(
    compiler: ProtocCompiler,
    language: TargetLanguage,
    input: &Path,
    output: &Path,
) -> anyhow::Result<WalkReport> {
    let dispatcher = Dispatcher::new(compiler, language)
        .on_built(|task| println!("Build successful: {}", task.file_name));

    let report = dispatcher
        .walk(input, output)
        .await
        .with_context(|| format!("building protos from {}", input.display()))?;

    println!(
        "Built {} proto file(s) into {}",
        report.built.len(),
        output.display()
    );
    Ok(report)
}
