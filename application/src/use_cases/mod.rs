//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod question_submitter;
pub mod session_store;
pub mod submit_question;
