//! Upstream conversation session domain.
//!
//! - [`entities::Session`] — a conversation handle bound to one document
//! - [`id_fields::SessionIdFields`] — which response fields may carry the handle

pub mod entities;
pub mod id_fields;
