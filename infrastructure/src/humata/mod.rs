//! Humata document Q&A adapter
//!
//! - [`gateway`]: [`HumataGateway`](gateway::HumataGateway), the reqwest-based
//!   implementation of the `QaGateway` port
//! - [`protocol`]: request bodies for `/conversations` and `/ask`
//! - [`stream`]: event-stream line reader
//! - [`error`]: adapter errors and their mapping onto `GatewayError`

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod stream;
