use crate::config::types::{AiConfig, AiSettings, ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("missing API key: set OPENAI_API_KEY or [ai].api_key in the config file")]
    MissingApiKey,

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// An explicit `config_path` must exist. Without one, the default location
    /// is read if present and built-in defaults are used otherwise.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let p = default_config_path();
                if !p.exists() {
                    return Ok(ResolvedConfig::default());
                }
                p
            }
        };

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if let Some(version) = cf.version {
            if version != 1 {
                return Err(ConfigError::BadVersion(version));
            }
        }

        Ok(ResolvedConfig {
            logging: resolve_logging(&cf.logging)?,
            ai: cf.ai,
            source: Some(path),
        })
    }
}

fn resolve_logging(log_cfg: &LoggingConfig) -> Result<LoggingConfig, ConfigError> {
    let Some(ref file) = log_cfg.file else {
        return Ok(log_cfg.clone());
    };
    Ok(LoggingConfig {
        level: log_cfg.level.clone(),
        file_level: log_cfg.file_level.clone(),
        file: Some(expand_path(&file.to_string_lossy())?),
    })
}

impl AiSettings {
    /// Resolve client settings from the config file and the process environment.
    pub fn from_env(cfg: &AiConfig) -> Result<Self, ConfigError> {
        Self::resolve(cfg, |var| env::var(var).ok())
    }

    /// Resolve client settings, with `lookup` values taking precedence over `cfg`.
    pub fn resolve(
        cfg: &AiConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY)
            .or_else(|| cfg.api_key.clone())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = get(ENV_BASE_URL)
            .or_else(|| cfg.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = get(ENV_MODEL)
            .or_else(|| cfg.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_tokens = match get(ENV_MAX_TOKENS) {
            Some(v) => parse_env(ENV_MAX_TOKENS, &v)?,
            None => cfg.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let temperature = match get(ENV_TEMPERATURE) {
            Some(v) => parse_env(ENV_TEMPERATURE, &v)?,
            None => cfg.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        Ok(Self { api_key, base_url, model, max_tokens, temperature })
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value: value.to_string() })
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("mdmeta").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("mdmeta").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
