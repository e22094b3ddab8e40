//! Infrastructure layer for docqa-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod humata;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnswerConfig, FileConfig, FileLoggingConfig,
    FileServerConfig, FileUpstreamConfig, ResolveConfigError,
};
pub use humata::{
    error::{HumataError, Result},
    gateway::{DEFAULT_BASE_URL, HumataGateway},
};
pub use logging::JsonlExchangeLogger;
