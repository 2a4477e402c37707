//! Core type definitions for the catalog assistant
//!
//! This module contains the fundamental types used throughout the system:
//! - Turn / Transcript: the append-only conversation log
//! - Intent: classification of a user utterance
//! - DatasetRecord: a raw catalog search hit
//! - Judgment: a model-produced relevance verdict for one dataset

mod dataset;
mod intent;
mod judgment;
mod turn;

pub use dataset::DatasetRecord;
pub use intent::Intent;
pub use judgment::Judgment;
pub use turn::{Role, Transcript, Turn, TurnKind};
