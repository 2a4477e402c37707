//! DialogueSession - one user action end-to-end.

use std::fmt::Write;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use ndpchat_catalog::{CatalogError, CatalogSearch};
use ndpchat_core::codec::ProtocolError;
use ndpchat_core::projector::render_judgments;
use ndpchat_core::Transcript;
use ndpchat_model::{ModelClient, ModelError};

use crate::classifier::IntentClassifier;
use crate::justifier::RelevanceJustifier;

/// Rendered when a turn fails partway; the session itself survives.
pub const TURN_FAILED_MESSAGE: &str = "Something went wrong while handling your request. \
                                       Please try again.";

/// Session errors, one variant per collaborator plus the shared protocol
/// taxonomy.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Presentation seam: "render this block of text to the user".
///
/// Blocks arrive in display order while a turn is being handled; the
/// projector covers replay.
pub trait Renderer: Send {
    fn render(&mut self, text: &str);
}

/// Provisional status shown live while the catalog query is in flight.
/// Omitted on replay, where the classification turn stands in for it.
pub fn searching_status(search_terms: &[String]) -> String {
    let mut out =
        String::from("Please wait. We are searching NDP catalog by the terms for you:");
    for term in search_terms {
        let _ = write!(out, "\n - {}", term);
    }
    out
}

/// Owns the append-only Transcript and sequences one user action at a time.
///
/// Exactly one writer (this session) and one reader category (the
/// projector, per redraw). Concurrent sessions each get their own instance;
/// the transcript is never shared globally.
pub struct DialogueSession {
    id: String,
    transcript: Transcript,
    classifier: IntentClassifier,
    justifier: RelevanceJustifier,
    catalog: Arc<dyn CatalogSearch>,
}

impl DialogueSession {
    pub fn new(model: Arc<dyn ModelClient>, catalog: Arc<dyn CatalogSearch>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            transcript: Transcript::new(),
            classifier: IntentClassifier::new(model.clone()),
            justifier: RelevanceJustifier::new(model),
            catalog,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle one user action end-to-end.
    ///
    /// A failure aborts the remaining steps of this call but leaves the
    /// Transcript exactly as far as it got; a user-visible failure message
    /// is rendered and the error still propagates for logging.
    pub async fn handle(
        &mut self,
        user_text: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), SessionError> {
        match self.run_turn(user_text, renderer).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "turn failed");
                renderer.render(TURN_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    async fn run_turn(
        &mut self,
        user_text: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), SessionError> {
        let intent = self
            .classifier
            .classify(&mut self.transcript, user_text)
            .await?;

        if !intent.is_search_data {
            if let Some(answer) = &intent.alternative_answer {
                renderer.render(answer);
            }
            return Ok(());
        }

        renderer.render(&searching_status(&intent.search_terms));

        let records = self.catalog.search(&intent.search_terms).await?;
        info!(
            session_id = %self.id,
            record_count = records.len(),
            "catalog records received"
        );

        let judgments = self
            .justifier
            .justify(&mut self.transcript, &intent.search_terms, &records)
            .await?;

        renderer.render(&render_judgments(&judgments));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use ndpchat_core::projector::{project, NO_MATCH_MESSAGE};
    use ndpchat_core::DatasetRecord;
    use ndpchat_model::MockModelClient;

    struct CollectingRenderer {
        blocks: Vec<String>,
    }

    impl CollectingRenderer {
        fn new() -> Self {
            Self { blocks: Vec::new() }
        }
    }

    impl Renderer for CollectingRenderer {
        fn render(&mut self, text: &str) {
            self.blocks.push(text.to_string());
        }
    }

    struct RecordingCatalog {
        calls: Mutex<Vec<Vec<String>>>,
        records: Vec<DatasetRecord>,
    }

    impl RecordingCatalog {
        fn new(records: Vec<DatasetRecord>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                records,
            }
        }
    }

    #[async_trait]
    impl CatalogSearch for RecordingCatalog {
        async fn search(&self, terms: &[String]) -> Result<Vec<DatasetRecord>, CatalogError> {
            self.calls.lock().unwrap().push(terms.to_vec());
            Ok(self.records.clone())
        }
    }

    struct UnavailableCatalog;

    #[async_trait]
    impl CatalogSearch for UnavailableCatalog {
        async fn search(&self, _terms: &[String]) -> Result<Vec<DatasetRecord>, CatalogError> {
            Err(CatalogError::Http("connection refused".to_string()))
        }
    }

    fn session_with(
        responses: Vec<&str>,
        catalog: Arc<dyn CatalogSearch>,
    ) -> DialogueSession {
        let model = Arc::new(MockModelClient::new(responses));
        DialogueSession::new(model, catalog)
    }

    #[tokio::test]
    async fn test_non_search_turn_renders_alternative_answer_only() {
        let catalog = Arc::new(RecordingCatalog::new(Vec::new()));
        let mut session = session_with(
            vec![r#"{"is_search_data": false, "alternative_answer": "NDP is a national data platform."}"#],
            catalog.clone(),
        );
        let mut renderer = CollectingRenderer::new();

        session.handle("What is NDP?", &mut renderer).await.unwrap();

        assert_eq!(renderer.blocks, vec!["NDP is a national data platform."]);
        assert!(catalog.calls.lock().unwrap().is_empty());
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_search_turn_runs_both_phases() {
        let catalog = Arc::new(RecordingCatalog::new(vec![DatasetRecord::new(
            "ds-1",
            "Quake Catalog|M>3 events in CA",
        )]));
        let mut session = session_with(
            vec![
                r#"{"is_search_data": true, "search_terms": ["earthquake", "California"]}"#,
                r#"[{"dataset_id":"ds-1","title":"Quake Catalog","summary":"M>3 events","is_relevant":true,"reason":"matches the terms"}]"#,
            ],
            catalog.clone(),
        );
        let mut renderer = CollectingRenderer::new();

        session
            .handle("find earthquake data in California", &mut renderer)
            .await
            .unwrap();

        let calls = catalog.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec![
            "earthquake".to_string(),
            "California".to_string()
        ]]);

        assert_eq!(renderer.blocks.len(), 2);
        assert!(renderer.blocks[0].contains("searching NDP catalog"));
        assert!(renderer.blocks[0].contains("\n - earthquake"));
        assert!(renderer.blocks[1].contains("Dataset ID: ds-1"));

        // Records reached the summary request verbatim.
        let summary_request = &session.transcript().turns()[2];
        assert!(summary_request.raw_text.contains("Dataset Id: ds-1"));
        assert!(summary_request
            .raw_text
            .contains("Description: M>3 events in CA"));
        assert_eq!(session.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_all_irrelevant_judgments_render_no_match_message() {
        let catalog = Arc::new(RecordingCatalog::new(vec![DatasetRecord::new(
            "ds-1",
            "Fires|TX burn scars",
        )]));
        let mut session = session_with(
            vec![
                r#"{"is_search_data": true, "search_terms": ["earthquake"]}"#,
                r#"[{"dataset_id":"ds-1","title":"Fires","summary":"TX burn scars","is_relevant":false,"reason":"fire simulation is not earthquake simulation"}]"#,
            ],
            catalog,
        );
        let mut renderer = CollectingRenderer::new();

        session
            .handle("earthquake data please", &mut renderer)
            .await
            .unwrap();

        assert_eq!(renderer.blocks[1], NO_MATCH_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_classification_surfaces_failure_and_keeps_log() {
        let catalog = Arc::new(RecordingCatalog::new(Vec::new()));
        let mut session = session_with(vec!["glad to help!"], catalog.clone());
        let mut renderer = CollectingRenderer::new();

        let result = session.handle("find data", &mut renderer).await;

        assert!(matches!(result, Err(SessionError::Protocol(_))));
        assert_eq!(renderer.blocks, vec![TURN_FAILED_MESSAGE]);
        assert!(catalog.calls.lock().unwrap().is_empty());
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_catalog_failure_aborts_before_justification() {
        let mut session = session_with(
            vec![r#"{"is_search_data": true, "search_terms": ["earthquake"]}"#],
            Arc::new(UnavailableCatalog),
        );
        let mut renderer = CollectingRenderer::new();

        let result = session.handle("find earthquake data", &mut renderer).await;

        assert!(matches!(result, Err(SessionError::Catalog(_))));
        // Status was shown, then the failure; no judgment block.
        assert_eq!(renderer.blocks.len(), 2);
        assert_eq!(renderer.blocks[1], TURN_FAILED_MESSAGE);
        // Only the classify exchange made it into the log.
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_next_turn_replays_prior_context() {
        let catalog = Arc::new(RecordingCatalog::new(Vec::new()));
        let mut session = session_with(
            vec![
                r#"{"is_search_data": false, "alternative_answer": "First answer."}"#,
                r#"{"is_search_data": false, "alternative_answer": "Second answer."}"#,
            ],
            catalog,
        );
        let mut renderer = CollectingRenderer::new();

        session.handle("first question", &mut renderer).await.unwrap();
        session.handle("second question", &mut renderer).await.unwrap();

        assert_eq!(session.transcript().len(), 4);
        let view = project(session.transcript());
        let texts: Vec<&str> = view.iter().map(|t| t.display_text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "first question",
                "First answer.",
                "second question",
                "Second answer."
            ]
        );
    }
}
