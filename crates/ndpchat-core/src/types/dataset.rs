//! Catalog dataset record.

use serde::{Deserialize, Serialize};

/// One record returned by the catalog search service.
///
/// The service packs the title and the body into `description`, joined by a
/// single `|`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub dataset_id: String,
    pub description: String,
}

impl DatasetRecord {
    pub fn new(dataset_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            description: description.into(),
        }
    }

    /// Split `description` into `(title, body)` on the FIRST `|` only;
    /// the body may itself contain `|`. A description without a delimiter
    /// becomes the title with an empty body.
    pub fn split_description(&self) -> (&str, &str) {
        self.description
            .split_once('|')
            .unwrap_or((self.description.as_str(), ""))
    }
}
