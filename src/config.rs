use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

fn default_listen_addr() -> String {
    "127.0.0.1:4221".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the listener binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the file routes read from and write to
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Partial view used when merging a config file with command-line flags.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: Option<ServerConfig>,
    #[serde(default)]
    storage: Option<StorageConfig>,
}

impl Config {
    /// Loads configuration from the process arguments.
    ///
    /// A storage directory is mandatory; starting without one is a fatal
    /// condition.
    pub fn load() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    /// Parses `--directory <path>` and optionally `--config <file.yaml>`.
    /// The directory flag overrides the file's `storage.directory`.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut config_path: Option<PathBuf> = None;
        let mut directory: Option<PathBuf> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config requires a path")?;
                    config_path = Some(PathBuf::from(value));
                }
                "--directory" => {
                    let value = args.next().context("--directory requires a path")?;
                    directory = Some(PathBuf::from(value));
                }
                other => bail!("Unknown argument: {}", other),
            }
        }

        let file = match config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read config file {}", path.display())
                })?;
                serde_yaml::from_str::<ConfigFile>(&raw).with_context(|| {
                    format!("Failed to parse config file {}", path.display())
                })?
            }
            None => ConfigFile::default(),
        };

        let directory = directory
            .or(file.storage.map(|s| s.directory))
            .context("No file storage directory configured (pass --directory <path>)")?;

        Ok(Self {
            server: file.server.unwrap_or_default(),
            storage: StorageConfig { directory },
        })
    }

    /// Parses a full YAML document into a config.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("Failed to parse config")
    }
}
