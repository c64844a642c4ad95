//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Wraps `reqwest` with store-finder-specific request construction: the maps
//! grounding tool biased around a search center, the `[DATA]` line contract in
//! the prompt, and a structured-output geocoding call. API-level failures are
//! classified into [`GeminiError`], with invalid-credential responses surfaced
//! as their own variant so callers can show a distinct message.

mod client;
mod error;
pub mod prompt;
mod types;

pub use client::{GeminiClient, RawSearchResponse};
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GroundingChunk,
    GroundingMetadata, MapsSource, Part,
};
