use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Send one user text to the generation service with a fixed instruction and
/// a requested output schema, and return the generated text. The service is
/// asked for JSON output constrained to `schema`; parsing that text is the
/// caller's job.
pub async fn generate_structured(
    api_key: &str,
    model: &str,
    instruction: &str,
    text: &str,
    schema: Value,
) -> Result<String, AgentError> {
    let request = GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: instruction.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        },
    };

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AgentError::UpstreamModel(e.to_string()))?;

    let response = client
        .post(format!("{}/{}:generateContent", GEMINI_ENDPOINT, model))
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| AgentError::UpstreamModel(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AgentError::UpstreamModel(e.to_string()))?;

    if !status.is_success() {
        return Err(AgentError::UpstreamModel(format!(
            "status {}: {}",
            status, body
        )));
    }

    let parsed: GenerateContentResponse = serde_json::from_str(&body)
        .map_err(|e| AgentError::UpstreamModel(format!("unreadable response: {}", e)))?;

    let text = parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone())
        .ok_or_else(|| AgentError::UpstreamModel("no candidates in response".to_string()))?;

    Ok(text)
}
