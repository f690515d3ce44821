use std::path::PathBuf;

use clap::Args;

use protoport_core::TargetLanguage;

use super::GlobalArgs;
use crate::config::load_config;
use crate::paths;

#[derive(Args)]
pub struct BasicArgs {
    /// Folder to read proto files from (defaults to `inputs/` next to the executable)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Output folder (must exist; defaults to `outputs/` next to the executable)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long, help = super::lang_help())]
    pub lang: Option<String>,
}

pub async fn run(args: BasicArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config();
    let language = TargetLanguage::parse(&config.language(args.lang.as_deref())?)?;
    let compiler = super::protoc_compiler(&config, global)?;

    let base = paths::executable_dir()?;
    let input = paths::resolve_input(args.input.as_deref(), &base)?;
    let output = paths::resolve_output(args.output.as_deref(), &base)?;

    super::compile_tree(compiler, language, &input, &output).await?;
    Ok(())
}
