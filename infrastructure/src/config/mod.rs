//! Configuration file loading for docqa-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DOCQA_RELAY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./docqa-relay.toml` or `./.docqa-relay.toml`
//! 4. Global: `$XDG_CONFIG_HOME/docqa-relay/config.toml`
//! 5. Default values
//!
//! Credentials are resolved separately, see
//! [`FileUpstreamConfig::resolve_api_key`].

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_WELCOME_MESSAGE, FileAnswerConfig, FileConfig,
    FileLoggingConfig, FileServerConfig, FileUpstreamConfig, ResolveConfigError,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
