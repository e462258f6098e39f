use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

const ENV_PREFIX: &str = "NOVELFETCH_";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/94.0.4606.81 Safari/537.36 Vivaldi/4.3.2439.44";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the content-addressed cache.
    pub cache_dir: PathBuf,
    /// Maximum number of chapters fetched at the same time.
    pub workers: usize,
    pub user_agent: String,
    /// Per-request timeout in seconds; `0` disables it.
    pub timeout: u64,
    /// Skip TLS certificate validation. Some sources serve broken chains.
    pub insecure_tls: bool,
    pub converter: ConverterConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Directory containing `ebook-convert`, searched before `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".cache"),
            workers: 4,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: 30,
            insecure_tls: false,
            converter: ConverterConfig::default(),
        }
    }
}

/// Values given on the command line. Anything left as `None` falls through
/// to the lower layers.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cache_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub insecure_tls: Option<bool>,
    pub converter_directory: Option<PathBuf>,
}

impl Overrides {
    fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(dir) = &self.cache_dir {
            figment = figment.merge(Serialized::default("cache_dir", dir));
        }
        if let Some(workers) = self.workers {
            figment = figment.merge(Serialized::default("workers", workers));
        }
        if let Some(insecure) = self.insecure_tls {
            figment = figment.merge(Serialized::default("insecure_tls", insecure));
        }
        if let Some(dir) = &self.converter_directory {
            figment = figment.merge(Serialized::default("converter.directory", dir));
        }
        figment
    }
}

impl Config {
    /// Per-user config file location, e.g. `~/.config/novelfetch/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "novelfetch").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves every layer and validates the result.
    ///
    /// An explicit `path` must exist; the default location is optional.
    #[instrument(skip(overrides))]
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                merge_file(figment, path)?
            },
            None => match Self::default_path() {
                Some(path) if path.is_file() => merge_file(figment, &path)?,
                _ => figment,
            },
        };
        let figment = overrides.apply(figment.merge(Env::prefixed(ENV_PREFIX).split("__")));
        let config: Self = figment.extract().map_err(|e| ErrorKind::Load(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            exn::bail!(ErrorKind::Invalid("workers must be at least 1".to_string()));
        }
        if self.user_agent.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("user_agent must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    tracing::debug!(path = %path.display(), "Reading config file");
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}
