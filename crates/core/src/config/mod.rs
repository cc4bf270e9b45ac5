//! Configuration: optional TOML file plus environment overrides.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{AiConfig, AiSettings, LoggingConfig, ResolvedConfig};
