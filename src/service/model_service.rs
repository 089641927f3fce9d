use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::clients::gemini_client;
use crate::error::AgentError;
use crate::service::prompts::ExtractionTask;

/// Seam to the structured text-generation service. One call sends free text
/// plus a task's instruction and schema, and yields the parsed JSON value.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn extract(&self, task: &ExtractionTask, text: &str) -> Result<Value, AgentError>;
}

/// Decode an extraction payload into its target shape. A mismatch is a
/// schema violation: the remote service was asked to enforce the shape and
/// did not.
pub fn parse_extraction<T: DeserializeOwned>(value: Value) -> Result<T, AgentError> {
    serde_json::from_value(value).map_err(|e| AgentError::SchemaViolation(e.to_string()))
}

pub struct GeminiService {
    api_key: String,
    model: String,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        Self { api_key, model }
    }
}

#[async_trait]
impl ModelClient for GeminiService {
    async fn extract(&self, task: &ExtractionTask, text: &str) -> Result<Value, AgentError> {
        let payload = gemini_client::generate_structured(
            &self.api_key,
            &self.model,
            &task.instruction(),
            text,
            task.response_schema(),
        )
        .await?;
        debug!(task = task.name(), payload = %payload, "extraction payload");
        serde_json::from_str(&payload).map_err(|e| AgentError::SchemaViolation(e.to_string()))
    }
}
