/// LLM Client: the single point of entry for all Gemini API calls.
///
/// No other module may call the provider directly. Callers depend on the
/// `TextGenerator` trait so the cascade and suggestion services can be
/// exercised with fakes.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const API_KEY_HEADER: &str = "x-goog-api-key";
/// First retry waits this long; each further retry doubles it.
const BASE_BACKOFF: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Prompt blocked by provider: {0}")]
    Blocked(String),

    #[error("LLM response did not contain a JSON object")]
    NoJson,
}

/// Sampling parameters forwarded to the provider's `generationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Near-deterministic output for structured extraction.
    pub const EXTRACTION: GenerationParams = GenerationParams {
        temperature: 0.1,
        top_p: 0.8,
        top_k: 20,
        max_output_tokens: 8192,
    };

    /// Looser sampling for writing suggestions.
    pub const CREATIVE: GenerationParams = GenerationParams {
        temperature: 0.7,
        top_p: 0.95,
        top_k: 40,
        max_output_tokens: 2048,
    };
}

/// Anything that turns a prompt into model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError>;
}

/// Calls the generator and deserializes the JSON object embedded in its reply.
/// The prompt must instruct the model to return a JSON object.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    params: &GenerationParams,
) -> Result<T, LlmError> {
    let text = generator.generate(prompt, system, params).await?;
    let json = extract_json_object(&text).ok_or(LlmError::NoJson)?;
    serde_json::from_str(json).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    generation_config: &'a GenerationParams,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client with timeout, retry and backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_retries: u32,
    base_backoff: Duration,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: generate_content_url(base_url, model),
            model: model.to_string(),
            max_retries: max_retries.max(1),
            base_backoff: BASE_BACKOFF,
        })
    }

    #[cfg(test)]
    fn with_base_backoff(mut self, base: Duration) -> Self {
        self.base_backoff = base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries on network errors, 429 and 5xx with exponential backoff.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        params: &GenerationParams,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = build_request(prompt, system, params);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.base_backoff, attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .header(API_KEY_HEADER, &self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!("LLM request failed: {e}");
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(if status.as_u16() == 429 {
                    LlmError::RateLimited {
                        retries: self.max_retries,
                    }
                } else {
                    LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            if let Some(usage) = &llm_response.usage_metadata {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                    self.model, usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, params).await?;
        if let Some(reason) = response.block_reason() {
            return Err(LlmError::Blocked(reason.to_string()));
        }
        response.text().ok_or(LlmError::EmptyContent)
    }
}

fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

fn build_request<'a>(
    prompt: &'a str,
    system: &'a str,
    params: &'a GenerationParams,
) -> GeminiRequest<'a> {
    let system_instruction = if system.trim().is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: system }],
        })
    };
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![GeminiPart { text: prompt }],
        }],
        system_instruction,
        generation_config: params,
    }
}

/// base, 2×base, 4×base, ... for attempt 1, 2, 3, ...
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    base * (1u32 << exp)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the span from the first `{` to the last `}` of the (fence-stripped)
/// text. Models routinely wrap JSON in prose.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_object_surrounded_by_prose() {
        let input = "Sure! Here is the data:\n{\"a\": {\"b\": 1}}\nLet me know if you need more.";
        assert_eq!(extract_json_object(input), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(BASE_BACKOFF, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(BASE_BACKOFF, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(BASE_BACKOFF, 3), Duration::from_millis(4000));
    }

    #[test]
    fn test_generate_content_url_trims_slash() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/", "gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request("hello", "be terse", &GenerationParams::EXTRACTION);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["generationConfig"]["topK"], 20);
    }

    #[test]
    fn test_request_body_omits_blank_system() {
        let body = build_request("hello", "  ", &GenerationParams::CREATIVE);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }"#;
        let resp: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text().as_deref(), Some("{\"a\": 1}"));
        assert_eq!(resp.usage_metadata.unwrap().prompt_token_count, 10);
    }

    #[test]
    fn test_response_blocked_prompt_has_no_text() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let resp: LlmResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.text().is_none());
        assert_eq!(resp.block_reason(), Some("SAFETY"));
    }

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_generate_json_reads_fenced_reply() {
        let gen = Canned("```json\n{\"score\": 71}\n```");
        let v: serde_json::Value =
            generate_json(&gen, "p", "s", &GenerationParams::EXTRACTION)
                .await
                .unwrap();
        assert_eq!(v["score"], 71);
    }

    #[tokio::test]
    async fn test_generate_json_without_object_fails() {
        let gen = Canned("I cannot help with that.");
        let r: Result<serde_json::Value, _> =
            generate_json(&gen, "p", "s", &GenerationParams::EXTRACTION).await;
        assert!(matches!(r, Err(LlmError::NoJson)));
    }

    // ── Against a local server scripted with status codes ──

    use axum::{extract::State, http::StatusCode, Router};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const OK_BODY: &str = r#"{"candidates": [{"content": {"parts": [{"text": "{\"ok\": true}"}]}}]}"#;

    #[derive(Default)]
    struct Scripted {
        replies: Mutex<VecDeque<(u16, String)>>,
        hits: AtomicUsize,
    }

    impl Scripted {
        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    async fn reply(State(server): State<Arc<Scripted>>) -> (StatusCode, String) {
        server.hits.fetch_add(1, Ordering::SeqCst);
        let (status, body) = server
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((500, String::new()));
        (StatusCode::from_u16(status).unwrap(), body)
    }

    async fn serve(replies: &[(u16, &str)]) -> (LlmClient, Arc<Scripted>) {
        let server = Arc::new(Scripted::default());
        server
            .replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|(s, b)| (*s, b.to_string())));

        let app = Router::new().fallback(reply).with_state(server.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = LlmClient::new(
            "test-key".to_string(),
            &format!("http://{addr}/v1beta"),
            "test-model",
            Duration::from_secs(5),
            3,
        )
        .unwrap()
        .with_base_backoff(Duration::from_millis(1));
        (client, server)
    }

    async fn run(client: &LlmClient) -> Result<String, LlmError> {
        client
            .generate("prompt", "system", &GenerationParams::EXTRACTION)
            .await
    }

    #[tokio::test]
    async fn test_retries_429_and_5xx_then_succeeds() {
        let (client, server) = serve(&[(503, "overloaded"), (429, ""), (200, OK_BODY)]).await;
        assert_eq!(run(&client).await.unwrap(), "{\"ok\": true}");
        assert_eq!(server.hits(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_429_is_rate_limited() {
        let (client, server) = serve(&[(429, ""), (429, ""), (429, "")]).await;
        assert!(matches!(
            run(&client).await,
            Err(LlmError::RateLimited { retries: 3 })
        ));
        assert_eq!(server.hits(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_5xx_is_api_error() {
        let (client, server) = serve(&[(500, "a"), (502, "b"), (500, "down")]).await;
        match run(&client).await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(server.hits(), 3);
    }

    #[tokio::test]
    async fn test_client_error_fails_without_retry() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        let (client, server) = serve(&[(400, body), (200, OK_BODY)]).await;
        match run(&client).await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_reported() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let (client, server) = serve(&[(200, body)]).await;
        assert!(matches!(run(&client).await, Err(LlmError::Blocked(r)) if r == "SAFETY"));
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_content() {
        let (client, _) = serve(&[(200, r#"{"candidates": []}"#)]).await;
        assert!(matches!(run(&client).await, Err(LlmError::EmptyContent)));
    }
}
