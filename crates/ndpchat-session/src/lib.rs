//! Dialogue orchestration for the NDP catalog assistant.
//!
//! One `DialogueSession` owns one append-only Transcript and sequences the
//! two-phase interaction per user action: classify the utterance, then
//! conditionally search the catalog and ask for relevance judgments. All
//! raw model exchanges land in the Transcript; the presentation layer only
//! ever receives blocks of text through the [`Renderer`] seam.

mod classifier;
mod justifier;
mod session;

pub use classifier::IntentClassifier;
pub use justifier::RelevanceJustifier;
pub use session::{searching_status, DialogueSession, Renderer, SessionError, TURN_FAILED_MESSAGE};
