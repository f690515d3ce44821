use std::path::{Path, PathBuf};
use std::time::Duration;

use protoport_build::{DEFAULT_PROTOC, DEFAULT_TIMEOUT};
use protoport_core::TargetLanguage;
use protoport_github::DEFAULT_API_BASE;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const TOKEN_ENV_VARS: [&str; 2] = ["PROTOPORT_GITHUB_TOKEN", "GITHUB_TOKEN"];

/// Contents of `<config dir>/protoport/config.toml`. Every field is optional;
/// command-line flags win over anything set here.
#[derive(serde::Serialize, serde::Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub protoc: Option<Vec<String>>,
    #[serde(default)]
    pub protoc_timeout_secs: Option<u64>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default)]
    pub api_base: Option<String>,
}

impl Config {
    /// A file with every default spelled out, for `config init`.
    pub fn with_defaults() -> Self {
        Self {
            language: None,
            protoc: Some(vec![DEFAULT_PROTOC.to_string()]),
            protoc_timeout_secs: Some(DEFAULT_TIMEOUT.as_secs()),
            http_timeout_secs: Some(DEFAULT_HTTP_TIMEOUT_SECS),
            github_token: None,
            api_base: Some(DEFAULT_API_BASE.to_string()),
        }
    }

    pub fn language(&self, flag: Option<&str>) -> anyhow::Result<String> {
        flag.or(self.language.as_deref())
            .filter(|lang| !lang.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "lang is required (use --lang or set `language` in the config file); supported: {}",
                    TargetLanguage::supported_list()
                )
            })
    }

    /// Compiler command line. A flag value is split on whitespace so
    /// `--protoc "buf protoc"` works.
    pub fn protoc_command(&self, flag: Option<&str>) -> Vec<String> {
        if let Some(flag) = flag {
            return flag.split_whitespace().map(str::to_string).collect();
        }
        self.protoc
            .clone()
            .filter(|cmd| !cmd.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PROTOC.to_string()])
    }

    pub fn protoc_timeout(&self, flag_secs: Option<u64>) -> Duration {
        flag_secs
            .or(self.protoc_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    pub fn api_base(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn github_token(&self, flag: Option<&str>) -> Option<String> {
        self.github_token_with(flag, |name| std::env::var(name).ok())
    }

    /// Flag, then environment, then config file. Empty values are ignored.
    pub fn github_token_with(
        &self,
        flag: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let non_empty = |t: &String| !t.trim().is_empty();
        flag.map(str::to_string)
            .filter(non_empty)
            .or_else(|| {
                TOKEN_ENV_VARS
                    .iter()
                    .find_map(|name| env(*name).filter(non_empty))
            })
            .or_else(|| self.github_token.clone().filter(non_empty))
    }
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("could not find config directory"))?;
    Ok(dir.join("protoport").join("config.toml"))
}

/// Missing or unreadable config files fall back to defaults.
pub fn load_config() -> Config {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => Config::default(),
    }
}

pub fn load_config_from(path: &Path) -> Config {
    if path.exists() {
        if let Ok(content) = std::fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "ignoring invalid config file");
                }
            }
        }
    }
    Config::default()
}

pub fn save_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
