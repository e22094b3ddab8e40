//! Answer domain: turning upstream replies into clean prose.
//!
//! - [`fragment`] — stripping event-stream framing and reading `content`
//! - [`assembler::AnswerAssembler`] — rejoining streamed fragments
//! - [`spacing`] — punctuation-spacing corrections applied to the joined text
//! - [`result::AnswerResult`] — the final answer and where it came from

pub mod assembler;
pub mod fragment;
pub mod result;
pub mod spacing;
