use std::sync::Arc;

use tracing::info;

use crate::error::AgentError;
use crate::models::classify::{CalendarCheck, RequestType};
use crate::service::model_service::{ModelClient, parse_extraction};
use crate::service::prompts::ExtractionTask;

/// Classifications at or below this score are treated as "unknown" and never
/// acted upon.
pub const CONFIDENCE_GATE: f64 = 0.7;

/// Two-stage request classifier. Each stage is one structured-extraction
/// call with its own instruction and schema; a low confidence score is a
/// valid terminal answer, not an error, and a failed model call propagates
/// unchanged rather than being replaced by a default classification.
pub struct RequestClassifier {
    model: Arc<dyn ModelClient>,
}

impl RequestClassifier {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    pub async fn check(&self, text: &str) -> Result<CalendarCheck, AgentError> {
        let value = self.model.extract(&ExtractionTask::CalendarCheck, text).await?;
        let check: CalendarCheck = parse_extraction(value)?;
        info!(
            is_calendar_event = check.is_calendar_event,
            confidence = check.confidence_score,
            "calendar check complete"
        );
        Ok(check)
    }

    pub async fn request_type(&self, text: &str) -> Result<RequestType, AgentError> {
        let value = self.model.extract(&ExtractionTask::RequestKind, text).await?;
        let request: RequestType = parse_extraction(value)?;
        info!(
            event_type = ?request.event_type,
            confidence = request.confidence_score,
            "request type determined"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::models::classify::RequestKind;

    struct FixedModel {
        response: Value,
    }

    #[async_trait]
    impl ModelClient for FixedModel {
        async fn extract(
            &self,
            _task: &ExtractionTask,
            _text: &str,
        ) -> Result<Value, AgentError> {
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn check_parses_the_model_verdict() {
        let classifier = RequestClassifier::new(Arc::new(FixedModel {
            response: json!({
                "description": "team meeting tomorrow at 2pm",
                "is_calendar_event": true,
                "confidence_score": 0.93
            }),
        }));
        let check = classifier.check("schedule a team meeting tomorrow at 2pm").await.unwrap();
        assert!(check.is_calendar_event);
        assert!(check.confidence_score > CONFIDENCE_GATE);
    }

    #[tokio::test]
    async fn request_type_parses_the_kind() {
        let classifier = RequestClassifier::new(Arc::new(FixedModel {
            response: json!({
                "description": "team meeting tomorrow at 2pm",
                "event_type": "delete_event",
                "confidence_score": 0.88
            }),
        }));
        let request = classifier.request_type("delete the team meeting").await.unwrap();
        assert_eq!(request.event_type, RequestKind::DeleteEvent);
    }

    #[tokio::test]
    async fn malformed_verdict_is_a_schema_violation() {
        let classifier = RequestClassifier::new(Arc::new(FixedModel {
            response: json!({ "is_calendar_event": "maybe" }),
        }));
        let result = classifier.check("schedule a meeting").await;
        assert!(matches!(result, Err(AgentError::SchemaViolation(_))));
    }
}
