//! Application-level configuration.
//!
//! - [`AskParams`] — model, answer approach and fallback text for questions

pub mod ask_params;

pub use ask_params::{AskParams, DEFAULT_MODEL};
