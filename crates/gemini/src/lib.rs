//! Gemini REST client used as the external script generation service.
//!
//! Provides the `generateContent` wire types and [`api::GeminiClient`],
//! which implements
//! [`GenerationService`](organizer_core::generation::GenerationService).

pub mod api;
pub mod wire;
