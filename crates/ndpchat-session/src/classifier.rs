//! Intent classification phase.

use std::sync::Arc;

use tracing::{debug, info};

use ndpchat_core::codec::decode_intent;
use ndpchat_core::prompts::intent_instruction;
use ndpchat_core::{Intent, Transcript, Turn};
use ndpchat_model::ModelClient;

use crate::session::SessionError;

const MAX_PREVIEW_LOG_CHARS: usize = 2_000;

/// Converts a user utterance into a structured [`Intent`] via the model.
pub struct IntentClassifier {
    client: Arc<dyn ModelClient>,
}

impl IntentClassifier {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Classify one utterance.
    ///
    /// Appends the templated instruction and the raw reply to the
    /// transcript before decoding, so the model context stays coherent even
    /// when the reply turns out to be malformed. Decode failures propagate;
    /// there is no retry and no fallback intent.
    pub async fn classify(
        &self,
        transcript: &mut Transcript,
        user_text: &str,
    ) -> Result<Intent, SessionError> {
        transcript.append(Turn::user_utterance(intent_instruction(user_text)));
        info!(
            utterance_len = user_text.len(),
            turn_count = transcript.len(),
            "intent classification requested"
        );

        let reply = self.client.generate(transcript).await?;
        transcript.append(Turn::classification_reply(reply.clone()));
        debug!(
            reply = %truncate_for_log(&reply, MAX_PREVIEW_LOG_CHARS),
            "raw classification reply"
        );

        let intent = decode_intent(&reply)?;
        info!(
            is_search_data = intent.is_search_data,
            term_count = intent.search_terms.len(),
            "intent decoded"
        );
        Ok(intent)
    }
}

pub(crate) fn truncate_for_log(input: &str, max_chars: usize) -> String {
    let char_count = input.chars().count();
    if char_count <= max_chars {
        return input.to_string();
    }
    let mut preview: String = input.chars().take(max_chars).collect();
    preview.push_str(&format!("... [truncated, total_chars={}]", char_count));
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndpchat_core::{Role, TurnKind};
    use ndpchat_model::MockModelClient;

    #[tokio::test]
    async fn test_classify_appends_instruction_and_reply() {
        let client = Arc::new(MockModelClient::new([
            r#"{"is_search_data": true, "search_terms": ["earthquake"]}"#,
        ]));
        let classifier = IntentClassifier::new(client);
        let mut transcript = Transcript::new();

        let intent = classifier
            .classify(&mut transcript, "find earthquake data")
            .await
            .unwrap();

        assert!(intent.is_search_data);
        assert_eq!(transcript.len(), 2);
        let turns = transcript.turns();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].kind, TurnKind::UserVisible);
        assert!(turns[0].raw_text.contains("find earthquake data"));
        assert_eq!(turns[1].kind, TurnKind::InternalClassification);
    }

    #[tokio::test]
    async fn test_classify_keeps_turns_on_malformed_reply() {
        let client = Arc::new(MockModelClient::new(["I would love to help!"]));
        let classifier = IntentClassifier::new(client);
        let mut transcript = Transcript::new();

        let result = classifier.classify(&mut transcript, "anything").await;

        assert!(matches!(result, Err(SessionError::Protocol(_))));
        // Both turns stay: the log is append-only and future model context
        // must include the failed exchange.
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_truncate_for_log_marks_total_length() {
        let truncated = truncate_for_log(&"x".repeat(30), 10);
        assert!(truncated.contains("total_chars=30"));
    }
}
