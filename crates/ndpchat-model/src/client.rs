//! Model client trait and test double.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use ndpchat_core::Transcript;

/// Model collaborator errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Request/response contract with the generative model.
///
/// The transcript is the conversational context; the last turn is the
/// instruction being answered. The reply is free-form text expected to
/// contain JSON, decoded by the caller.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, transcript: &Transcript) -> Result<String, ModelError>;
}

#[async_trait]
impl ModelClient for Arc<dyn ModelClient> {
    async fn generate(&self, transcript: &Transcript) -> Result<String, ModelError> {
        (**self).generate(transcript).await
    }
}

/// Scripted model client for tests and examples.
///
/// Replies are returned in order; running out of script is an error, since
/// it means the code under test issued an unexpected model call.
pub struct MockModelClient {
    responses: Mutex<VecDeque<String>>,
}

impl MockModelClient {
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, _transcript: &Transcript) -> Result<String, ModelError> {
        self.responses
            .lock()
            .expect("mock script lock")
            .pop_front()
            .ok_or_else(|| ModelError::Response("mock script exhausted".to_string()))
    }
}
