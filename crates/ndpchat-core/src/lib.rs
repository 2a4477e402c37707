//! # ndpchat Core
//!
//! Turn protocol and transcript projection for the NDP catalog assistant.
//!
//! This crate contains:
//! - Turn / Transcript / Intent / DatasetRecord / Judgment definitions
//! - ProtocolCodec: instruction templates and model-response decoding
//! - TranscriptProjector: the user-visible view derived from the raw log
//!
//! This crate does NOT care about:
//! - Which model backend produces the responses
//! - How the catalog service is reached
//! - How the projected view is painted on screen

pub mod codec;
pub mod projector;
pub mod prompts;
pub mod types;

pub use codec::{decode, decode_intent, decode_judgments, ProtocolError};
pub use projector::{project, render_judgments, ProjectedTurn, ProjectedView};
pub use types::{DatasetRecord, Intent, Judgment, Role, Transcript, Turn, TurnKind};
