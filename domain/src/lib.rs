//! Domain layer for docqa-relay
//!
//! This crate contains the core entities and the answer-assembly logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! An upstream conversation bound to one source document. The handle is
//! opaque; [`SessionIdFields`] lists which response fields may carry it.
//!
//! ## Answer assembly
//!
//! Streamed answers arrive as short `data:` records that split words at
//! arbitrary points. [`AnswerAssembler`] rejoins them into clean prose.

pub mod answer;
pub mod core;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use answer::{
    assembler::{AnswerAssembler, AssemblyStats},
    fragment::{FragmentError, ParsedLine, parse_line, strip_framing},
    result::{AnswerResult, AnswerSource, DEFAULT_FALLBACK_ANSWER},
    spacing::fix_spacing,
};
pub use core::{document::DocumentId, error::DomainError, question::Question};
pub use session::{
    entities::Session,
    id_fields::{DEFAULT_SESSION_ID_FIELDS, SessionIdFields},
};
