//! Relevance judgment phase.

use std::sync::Arc;

use tracing::{debug, info};

use ndpchat_core::codec::decode_judgments;
use ndpchat_core::prompts::summary_instruction;
use ndpchat_core::{DatasetRecord, Judgment, Transcript, Turn};
use ndpchat_model::ModelClient;

use crate::classifier::truncate_for_log;
use crate::session::SessionError;

const MAX_PREVIEW_LOG_CHARS: usize = 4_000;

/// Converts raw catalog records into ranked, summarized [`Judgment`]s.
///
/// The disambiguation rules (state abbreviations, coordinates, fire vs.
/// earthquake simulation) are instruction content only; this side never
/// re-implements them.
pub struct RelevanceJustifier {
    client: Arc<dyn ModelClient>,
}

impl RelevanceJustifier {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Ask the model to judge one batch of search hits.
    ///
    /// The summary instruction is recorded as a user-role turn even though
    /// no human authored it; the raw reply pairs with it as an assistant
    /// turn.
    pub async fn justify(
        &self,
        transcript: &mut Transcript,
        search_terms: &[String],
        records: &[DatasetRecord],
    ) -> Result<Vec<Judgment>, SessionError> {
        let instruction = summary_instruction(search_terms, records);
        transcript.append(Turn::summary_request(instruction));
        info!(
            record_count = records.len(),
            term_count = search_terms.len(),
            "relevance judgment requested"
        );

        let reply = self.client.generate(transcript).await?;
        transcript.append(Turn::judgment_reply(reply.clone()));
        debug!(
            reply = %truncate_for_log(&reply, MAX_PREVIEW_LOG_CHARS),
            "raw judgment reply"
        );

        let judgments = decode_judgments(&reply)?;
        info!(
            judgment_count = judgments.len(),
            relevant_count = judgments.iter().filter(|j| j.is_relevant).count(),
            "judgments decoded"
        );
        Ok(judgments)
    }
}
