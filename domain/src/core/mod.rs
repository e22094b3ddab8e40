//! Core domain concepts shared across all subdomains.
//!
//! - [`document::DocumentId`] — the upstream document a conversation is bound to
//! - [`question::Question`] — a validated question to relay upstream
//! - [`error::DomainError`] — domain-level errors

pub mod document;
pub mod error;
pub mod question;
