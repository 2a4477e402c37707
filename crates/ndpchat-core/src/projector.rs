//! Projection from the raw Transcript to the user-visible view.
//!
//! The same flat log serves as the model's conversational memory, where
//! every turn must appear, and as the human-facing transcript, where
//! internal protocol turns must be invisible and live renderings must not
//! be duplicated on replay. Projection is a pure function of transcript
//! content plus the kind tag each turn carries; the display is rebuilt from
//! scratch on every redraw, never maintained incrementally.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::codec::{decode_intent, decode_judgments};
use crate::prompts::{UTTERANCE_END, UTTERANCE_START};
use crate::types::{Judgment, Role, Transcript, Turn, TurnKind};

/// Header shown once above the relevant-dataset blocks.
pub const RELEVANT_HEADER: &str = "Below are the NDP datasets that are semantically closest to \
                                   your request.\nOur searches and justifications are performed \
                                   using AI.\nIf you need more relevant datasets, please use \
                                   other search tools on NDP.";

/// Shown when the judgment list contains no relevant dataset.
pub const NO_MATCH_MESSAGE: &str = "We couldn't locate a dataset closely aligned with your \
                                    request.\nYou can try refining your search for further \
                                    attempts.";

/// One display entry of the projected view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedTurn {
    pub role: Role,
    pub display_text: String,
}

/// The ordered, user-visible subset of a Transcript.
pub type ProjectedView = Vec<ProjectedTurn>;

/// Derive the user-visible view from the raw transcript.
///
/// Stateless and idempotent; a turn whose payload no longer decodes is
/// omitted, since its failure was already surfaced live.
pub fn project(transcript: &Transcript) -> ProjectedView {
    transcript.turns().iter().filter_map(project_turn).collect()
}

fn project_turn(turn: &Turn) -> Option<ProjectedTurn> {
    let display_text = match (turn.role, turn.kind) {
        // Synthesized on the user's behalf; no human typed it.
        (Role::User, TurnKind::InternalSummaryRequest) => return None,
        (Role::User, _) => extract_utterance(&turn.raw_text).to_string(),
        (Role::Assistant, TurnKind::InternalClassification) => {
            let intent = decode_intent(&turn.raw_text).ok()?;
            if intent.is_search_data {
                // Already represented by the provisional search message
                // shown live; replaying it would duplicate the rendering.
                return None;
            }
            intent.alternative_answer?
        }
        (Role::Assistant, _) => {
            let judgments = decode_judgments(&turn.raw_text).ok()?;
            render_judgments(&judgments)
        }
    };
    Some(ProjectedTurn {
        role: turn.role,
        display_text,
    })
}

/// Extract the human-authored span between the instruction sentinels.
///
/// Falls back to the whole trimmed text when the sentinels are absent.
fn extract_utterance(raw_text: &str) -> &str {
    let Some(start) = raw_text.find(UTTERANCE_START) else {
        return raw_text.trim();
    };
    let span = &raw_text[start + UTTERANCE_START.len()..];
    match span.find(UTTERANCE_END) {
        Some(end) => span[..end].trim(),
        None => raw_text.trim(),
    }
}

/// Render a judgment list, grouping by relevance.
///
/// Relevant items get one block each under a shared header; a list with no
/// relevant item collapses to a single no-match message.
pub fn render_judgments(judgments: &[Judgment]) -> String {
    let relevant: Vec<&Judgment> = judgments.iter().filter(|j| j.is_relevant).collect();
    if relevant.is_empty() {
        return NO_MATCH_MESSAGE.to_string();
    }

    let mut out = String::from(RELEVANT_HEADER);
    for judgment in relevant {
        out.push_str("\n\n");
        let _ = writeln!(out, "Dataset ID: {}", judgment.dataset_id);
        let _ = writeln!(out, "Title: {}", judgment.title);
        let _ = writeln!(out, "Summary: {}", judgment.summary);
        let _ = write!(out, "Justification: {}", judgment.reason);
    }
    out
}
