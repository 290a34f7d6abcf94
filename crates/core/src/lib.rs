//! Core domain logic for the file organizer script generator.
//!
//! Category rules, their normalization, the generation status machine,
//! prompt construction and the orchestrator that calls out to an external
//! [`GenerationService`](generation::GenerationService). Nothing in this
//! crate performs I/O directly.

pub mod defaults;
pub mod error;
pub mod generation;
pub mod orchestrator;
pub mod prompt;
pub mod rules;
pub mod session;
pub mod testing;
