//! Relevance judgment for one dataset record.

use serde::{Deserialize, Serialize};

/// Model-produced verdict and summary for one catalog dataset.
///
/// The summary is requested as plain text of at most 100 words; that bound
/// is instruction content, not something this crate re-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    pub dataset_id: String,
    pub title: String,
    pub summary: String,
    pub is_relevant: bool,
    pub reason: String,
}
