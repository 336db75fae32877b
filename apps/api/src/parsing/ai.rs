//! AI extraction layer: asks the model for the resume as JSON, then coerces
//! whatever comes back into the fixed record shape.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{generate_json, GenerationParams, LlmError, TextGenerator};
use crate::models::resume::StructuredResume;
use crate::parsing::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};
use crate::parsing::sanitize::{sanitize_resume, tidy_record};

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_PROMPT_CHARS: usize = 30_000;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("AI provider failed: {0}")]
    Provider(#[from] LlmError),
}

#[derive(Clone)]
pub struct AiExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl AiExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Returns the sanitized record. The caller decides whether it is good enough.
    pub async fn extract(&self, raw_text: &str) -> Result<StructuredResume, ExtractionError> {
        let prompt = build_prompt(raw_text);
        let parsed: Value = generate_json(
            self.generator.as_ref(),
            &prompt,
            RESUME_PARSE_SYSTEM,
            &GenerationParams::EXTRACTION,
        )
        .await?;

        debug!(
            keys = parsed.as_object().map(|o| o.len()).unwrap_or(0),
            "AI extraction returned JSON"
        );
        Ok(tidy_record(sanitize_resume(&parsed)))
    }
}

fn build_prompt(raw_text: &str) -> String {
    let text = match raw_text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &raw_text[..idx],
        None => raw_text,
    };
    RESUME_PARSE_PROMPT.replace("{raw_text}", text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        reply: Result<&'static str, ()>,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn ok(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(
            &self,
            prompt: &str,
            system: &str,
            params: &GenerationParams,
        ) -> Result<String, LlmError> {
            assert_eq!(system, RESUME_PARSE_SYSTEM);
            assert_eq!(*params, GenerationParams::EXTRACTION);
            self.seen.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(LlmError::RateLimited { retries: 3 }),
            }
        }
    }

    #[tokio::test]
    async fn test_extract_sanitizes_reply() {
        let gen = Scripted::ok(
            "Here you go:\n```json\n{\"personalInfo\": {\"fullName\": \"  Jane Doe \", \"email\": 42},\
             \"skills\": {\"technical\": \"Rust, Go\"}, \"experience\": \"none\"}\n```",
        );
        let record = AiExtractor::new(gen).extract("Jane Doe resume").await.unwrap();
        assert_eq!(record.personal_info.full_name, "Jane Doe");
        assert_eq!(record.personal_info.email, "42");
        assert_eq!(record.skills.technical, vec!["Rust", "Go"]);
        assert!(record.experience.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_embeds_text() {
        let gen = Scripted::ok("{}");
        AiExtractor::new(gen.clone())
            .extract("  Jane Doe\njane@x.com  ")
            .await
            .unwrap();
        let seen = gen.seen.lock().unwrap();
        assert!(seen[0].contains("RESUME TEXT:\nJane Doe\njane@x.com\n"));
        assert!(!seen[0].contains("{raw_text}"));
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let long = "é".repeat(MAX_PROMPT_CHARS + 500);
        let prompt = build_prompt(&long);
        assert_eq!(prompt.matches('é').count(), MAX_PROMPT_CHARS);
    }

    #[tokio::test]
    async fn test_provider_failure_is_extraction_error() {
        let r = AiExtractor::new(Scripted::failing()).extract("text").await;
        assert!(matches!(
            r,
            Err(ExtractionError::Provider(LlmError::RateLimited { .. }))
        ));
    }

    #[tokio::test]
    async fn test_reply_without_json_is_error() {
        let r = AiExtractor::new(Scripted::ok("Sorry, I can't read that."))
            .extract("text")
            .await;
        assert!(matches!(r, Err(ExtractionError::Provider(LlmError::NoJson))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_error() {
        let r = AiExtractor::new(Scripted::ok("{\"summary\": \"unterminated}"))
            .extract("text")
            .await;
        assert!(matches!(r, Err(ExtractionError::Provider(LlmError::Parse(_)))));
    }
}
