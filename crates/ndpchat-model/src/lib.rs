//! Model collaborator for the NDP catalog assistant.
//!
//! The assistant talks to the generative model through a single contract:
//! send the full transcript, receive free-form text expected to contain
//! JSON. This crate provides the Gemini implementation and a scripted mock
//! for tests.

mod client;
mod gemini;

pub use client::{MockModelClient, ModelClient, ModelError};
pub use gemini::{GeminiClient, GeminiClientConfig};
