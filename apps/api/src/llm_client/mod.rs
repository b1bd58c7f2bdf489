/// LLM Client: the single point of entry for all completion calls in Recipeasy.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All LLM interactions MUST go through `CompletionBackend`.
///
/// Model: gpt-4o-mini (hardcoded; do not make configurable, to prevent drift)
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for all LLM calls in Recipeasy.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o-mini";

/// Outbound request timeout. The upstream contract has no retries, so a
/// hung connection would otherwise pin the request indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Generation parameters, fixed per request type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionParams {
    /// Recipe generation: creative output, large budget.
    pub const fn recipes() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Calorie estimation: near-deterministic, small budget.
    pub const fn calories() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 200,
        }
    }

    /// Step generation: mid temperature, medium budget.
    pub const fn steps() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key rejected (status {status}): {message}")]
    InvalidApiKey { status: u16, message: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion contained no content")]
    EmptyContent,
}

/// Seam between the request handlers and the completion service.
/// Production uses `OpenAiClient`; tests substitute a scripted stub.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one prompt and returns the raw text of the single best
    /// completion. Exactly one attempt; callers own any retry policy.
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The OpenAI-backed completion client used in production.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body));
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!(chars = content.len(), "completion received");

        Ok(content)
    }
}

/// Classifies a non-success upstream response into the three-way error
/// taxonomy: invalid credential, rate limit, or anything else.
///
/// The HTTP status is authoritative; the error message text is only
/// inspected for statuses that carry no classification of their own
/// (some gateways report credential and quota problems as generic 4xx).
fn classify_api_error(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<OpenAiErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::InvalidApiKey {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
        _ => {
            let lower = message.to_lowercase();
            if lower.contains("api key") {
                LlmError::InvalidApiKey {
                    status: status.as_u16(),
                    message,
                }
            } else if lower.contains("rate limit") {
                LlmError::RateLimited { message }
            } else {
                LlmError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_401_as_invalid_key() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let err = classify_api_error(StatusCode::UNAUTHORIZED, body);
        match err {
            LlmError::InvalidApiKey { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected InvalidApiKey, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_429_as_rate_limited() {
        let body = r#"{"error": {"message": "You exceeded your current quota"}}"#;
        assert!(matches!(
            classify_api_error(StatusCode::TOO_MANY_REQUESTS, body),
            LlmError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_classify_falls_back_to_message_text() {
        let body = r#"{"error": {"message": "Invalid API key supplied in request"}}"#;
        assert!(matches!(
            classify_api_error(StatusCode::BAD_REQUEST, body),
            LlmError::InvalidApiKey { .. }
        ));

        let body = r#"{"error": {"message": "Model rate limit reached, slow down"}}"#;
        assert!(matches!(
            classify_api_error(StatusCode::SERVICE_UNAVAILABLE, body),
            LlmError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_classify_other_errors_keep_raw_body() {
        let err = classify_api_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_params_are_fixed_per_request_type() {
        assert_eq!(CompletionParams::recipes().max_tokens, 2000);
        assert_eq!(CompletionParams::calories().max_tokens, 200);
        assert_eq!(CompletionParams::steps().max_tokens, 1000);
        assert!(CompletionParams::calories().temperature < CompletionParams::recipes().temperature);
    }
}
