//! Intent type definitions
//!
//! Intent is the structured classification of a user utterance into
//! search-vs-non-search, with extracted keywords.

use serde::{Deserialize, Serialize};

/// Classification of one user utterance.
///
/// Invariant (checked at decode time): a search intent has at least one
/// search term; a non-search intent carries an alternative answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Whether the user is asking for datasets.
    pub is_search_data: bool,
    /// Keywords to query the catalog with, in extraction order.
    #[serde(default)]
    pub search_terms: Vec<String>,
    /// Direct answer for non-search utterances.
    #[serde(default)]
    pub alternative_answer: Option<String>,
}

impl Intent {
    /// Create a search intent.
    pub fn search(terms: Vec<String>) -> Self {
        Self {
            is_search_data: true,
            search_terms: terms,
            alternative_answer: None,
        }
    }

    /// Create a non-search intent carrying a direct answer.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            is_search_data: false,
            search_terms: Vec::new(),
            alternative_answer: Some(text.into()),
        }
    }
}
