use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use protoport_core::{ScratchDir, TargetLanguage};
use protoport_github::{ClientOptions, RepoRef};

use super::GlobalArgs;
use crate::config::load_config;
use crate::paths;

#[derive(Args)]
pub struct GithubArgs {
    /// Repository URL, e.g. https://github.com/owner/repo or owner/repo
    #[arg(short, long)]
    pub input: String,
    /// Folder inside the repository to start from
    #[arg(long)]
    pub path: Option<String>,
    /// Branch, tag or commit to read
    #[arg(long = "ref")]
    pub git_ref: Option<String>,
    /// Output folder (must exist; defaults to `outputs/` next to the executable)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Personal access token for private repositories
    #[arg(long)]
    pub pat: Option<String>,
    #[arg(short, long, help = super::lang_help())]
    pub lang: Option<String>,
    /// Download into this folder instead of a temporary one
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,
    /// Leave downloaded proto files on disk after the build
    #[arg(long)]
    pub keep_scratch: bool,
}

pub async fn run(args: GithubArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let config = load_config();

    // Reject a bad language before any network traffic.
    let language = TargetLanguage::parse(&config.language(args.lang.as_deref())?)?;
    let compiler = super::protoc_compiler(&config, global)?;

    let base = paths::executable_dir()?;
    let output = paths::resolve_output(args.output.as_deref(), &base)?;

    let mut repo = RepoRef::parse(&args.input)?;
    if let Some(git_ref) = args.git_ref {
        repo.git_ref = Some(git_ref);
    }
    let token = config.github_token(args.pat.as_deref());
    if token.is_none() {
        tracing::debug!(repo = %repo, "no token configured, using public access");
    }
    let options = ClientOptions {
        api_base: config.api_base(),
        token,
        timeout: config.http_timeout(),
    };

    let scratch = match &args.scratch_dir {
        Some(dir) => ScratchDir::prepare(dir)?,
        None => ScratchDir::temporary()?,
    };

    let label = repo.to_string();
    let materialized = protoport_github::materialize(repo, args.path.as_deref(), options, &scratch)
        .await
        .with_context(|| format!("fetching proto files from {label}"))?;
    println!(
        "Fetched {} proto file(s) from {label}",
        materialized.files.len()
    );

    super::compile_tree(compiler, language, &materialized.root, &output).await?;

    if args.keep_scratch {
        let kept = scratch.persist();
        println!("Proto files kept at {}", kept.display());
    }
    Ok(())
}
