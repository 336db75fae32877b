//! Extraction cascade: AI → heuristic → empty manual record.
//!
//! `ResumeParser::parse` never fails. The AI record must pass
//! `has_meaningful_content`; the heuristic record is kept if it found anything
//! at all. Otherwise the result is an empty, fully-shaped record and a soft
//! warning.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::resume::{ParsingMethod, StructuredResume};
use crate::parsing::ai::AiExtractor;
use crate::parsing::heuristic;

const AI_MESSAGE: &str = "Resume parsed successfully";
const HEURISTIC_MESSAGE: &str =
    "Resume parsed with basic extraction. Please review and complete the details";
const MANUAL_MESSAGE: &str =
    "We couldn't extract details from this resume. Please fill in your information manually";

#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub data: StructuredResume,
    pub method: ParsingMethod,
    pub message: String,
    pub warnings: Vec<String>,
}

impl ParseOutcome {
    fn new(data: StructuredResume, method: ParsingMethod, warnings: Vec<String>) -> Self {
        let message = match method {
            ParsingMethod::Ai => AI_MESSAGE,
            ParsingMethod::Heuristic => HEURISTIC_MESSAGE,
            ParsingMethod::Manual => MANUAL_MESSAGE,
        };
        Self {
            data,
            method,
            message: message.to_string(),
            warnings,
        }
    }

    /// Empty record for when there is no text to parse at all.
    pub fn manual(warnings: Vec<String>) -> Self {
        Self::new(StructuredResume::default(), ParsingMethod::Manual, warnings)
    }
}

/// Runs the extraction layers in priority order.
#[derive(Clone, Default)]
pub struct ResumeParser {
    ai: Option<AiExtractor>,
}

impl ResumeParser {
    /// `ai` is `None` when no provider is configured; the cascade then starts
    /// at the heuristic layer.
    pub fn new(ai: Option<AiExtractor>) -> Self {
        Self { ai }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn parse(&self, raw_text: &str) -> ParseOutcome {
        let mut warnings = Vec::new();

        if raw_text.trim().is_empty() {
            warn!("No text to parse, returning empty record");
            warnings.push("No readable text was found in the document".to_string());
            return ParseOutcome::manual(warnings);
        }

        if let Some(ai) = &self.ai {
            let started = Instant::now();
            match ai.extract(raw_text).await {
                Ok(record) if record.has_meaningful_content() => {
                    info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "AI extraction succeeded"
                    );
                    return ParseOutcome::new(record, ParsingMethod::Ai, warnings);
                }
                Ok(_) => {
                    warn!("AI extraction returned no usable content, falling back to heuristics");
                    warnings.push("AI extraction returned no usable content".to_string());
                }
                Err(e) => {
                    warn!(error = %e, "AI extraction failed, falling back to heuristics");
                    warnings.push("AI extraction is unavailable right now".to_string());
                }
            }
        } else {
            info!("AI extraction disabled, using heuristics");
        }

        let record = heuristic::extract(raw_text);
        if record != StructuredResume::default() {
            info!(
                experience = record.experience.len(),
                education = record.education.len(),
                "Heuristic extraction succeeded"
            );
            return ParseOutcome::new(record, ParsingMethod::Heuristic, warnings);
        }

        warn!("Heuristic extraction found nothing, returning empty record");
        warnings.push("No resume details could be recognized".to_string());
        ParseOutcome::manual(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{GenerationParams, LlmError, TextGenerator};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fake {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Fake {
        fn parser(reply: Option<&'static str>) -> (ResumeParser, Arc<Fake>) {
            let fake = Arc::new(Fake {
                reply,
                calls: AtomicUsize::new(0),
            });
            let parser = ResumeParser::new(Some(AiExtractor::new(fake.clone())));
            (parser, fake)
        }
    }

    #[async_trait]
    impl TextGenerator for Fake {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => Err(LlmError::Api {
                    status: 400,
                    message: "API key not valid".to_string(),
                }),
            }
        }
    }

    const TEXT: &str = "Contact: jane@x.com\nSkilled in JavaScript and Docker";

    #[tokio::test]
    async fn test_ai_success_wins() {
        let (parser, _) = Fake::parser(Some(
            r#"{"personalInfo": {"fullName": "Jane Doe", "email": "jane@x.com"}}"#,
        ));
        let outcome = parser.parse(TEXT).await;
        assert_eq!(outcome.method, ParsingMethod::Ai);
        assert_eq!(outcome.data.personal_info.full_name, "Jane Doe");
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_ai_error_falls_back_to_heuristic() {
        let (parser, fake) = Fake::parser(None);
        let outcome = parser.parse(TEXT).await;
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.method, ParsingMethod::Heuristic);
        assert_eq!(outcome.data.personal_info.email, "jane@x.com");
        assert!(outcome
            .data
            .skills
            .technical
            .contains(&"JavaScript".to_string()));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_ai_record_falls_back_to_heuristic() {
        let (parser, _) = Fake::parser(Some(r#"{"personalInfo": {}, "skills": []}"#));
        let outcome = parser.parse(TEXT).await;
        assert_eq!(outcome.method, ParsingMethod::Heuristic);
    }

    #[tokio::test]
    async fn test_without_ai_uses_heuristic() {
        let outcome = ResumeParser::default().parse(TEXT).await;
        assert_eq!(outcome.method, ParsingMethod::Heuristic);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_gives_manual_default() {
        let (parser, _) = Fake::parser(Some("not json at all"));
        let outcome = parser.parse("%%%% ---- 1234 ????").await;
        assert_eq!(outcome.method, ParsingMethod::Manual);
        assert_eq!(outcome.data, StructuredResume::default());
        assert_eq!(outcome.message, MANUAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_heuristic_keeps_contact_links_and_projects() {
        let text = "Phone: +1 555 123 4567\nlinkedin.com/in/janedoe\n\n\
                    PROJECTS\nFolio - resume builder\n\n\
                    CERTIFICATIONS\nCKA - CNCF (2023)";
        let outcome = ResumeParser::default().parse(text).await;
        assert_eq!(outcome.method, ParsingMethod::Heuristic);
        assert_eq!(outcome.data.personal_info.phone, "+1 555 123 4567");
        assert_eq!(outcome.data.personal_info.linkedin, "linkedin.com/in/janedoe");
        assert_eq!(outcome.data.projects.len(), 1);
        assert_eq!(outcome.data.certifications.len(), 1);
        assert!(!outcome.data.has_meaningful_content());
    }

    #[tokio::test]
    async fn test_empty_text_skips_ai() {
        let (parser, fake) = Fake::parser(Some("{}"));
        let outcome = parser.parse("  \n\t ").await;
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.method, ParsingMethod::Manual);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_outcome_always_has_full_shape() {
        for text in ["", "x", TEXT, "{\"a\": 1}"] {
            let outcome = ResumeParser::default().parse(text).await;
            let json = serde_json::to_value(&outcome.data).unwrap();
            assert!(json["personalInfo"].is_object());
            assert!(json["skills"]["languages"].is_array());
            assert!(json["certifications"].is_array());
        }
    }
}
