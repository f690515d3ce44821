use clap::{Args, Subcommand};

use crate::config::{config_path, load_config, save_config, Config};
use crate::output::{kv, mask};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print where the config file is read from
    Path,
    /// Print the effective settings
    Show,
    /// Write a config file with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config_path()?.display());
        }
        ConfigCommand::Show => {
            let config = load_config();
            let language = config.language.as_deref().unwrap_or("(not set)");
            let token = config
                .github_token(None)
                .map(|t| mask(&t))
                .unwrap_or_else(|| "(none)".to_string());

            println!("{}", kv("language", language));
            println!("{}", kv("protoc", &config.protoc_command(None).join(" ")));
            println!(
                "{}",
                kv("protoc timeout", &format!("{}s", config.protoc_timeout(None).as_secs()))
            );
            println!(
                "{}",
                kv("http timeout", &format!("{}s", config.http_timeout().as_secs()))
            );
            println!("{}", kv("api base", &config.api_base()));
            println!("{}", kv("github token", &token));
        }
        ConfigCommand::Init { force } => {
            let path = config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            save_config(&path, &Config::with_defaults())?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
