//! AI writing suggestions: summaries, bullet rewrites, skill ideas and ATS scoring.
//!
//! Every operation is cache-aside. A cache read or write failure never fails
//! the request; it only costs an extra provider call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ai::cache::{cache_key, ResponseCache};
use crate::ai::prompts::{
    ATS_PROMPT_TEMPLATE, ENHANCE_PROMPT_TEMPLATE, SKILLS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{
    ATS_STYLE_INSTRUCTION, JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION,
};
use crate::llm_client::{generate_json, GenerationParams, TextGenerator};
use crate::models::resume::StructuredResume;
use crate::parsing::sanitize::{dedup_case_insensitive, tidy_record};

const MAX_BULLETS: usize = 6;
const MAX_SUGGESTED_SKILLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

// Raw model replies. Lists default to empty so a partially filled reply still parses.

#[derive(Deserialize)]
struct SummaryReply {
    #[serde(default)]
    summary: String,
}

#[derive(Deserialize)]
struct BulletsReply {
    #[serde(default)]
    bullets: Vec<String>,
}

#[derive(Deserialize)]
struct SkillsReply {
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Clone)]
pub struct AiAssistant {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl AiAssistant {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        cache: Arc<dyn ResponseCache>,
        ttl: Duration,
    ) -> Self {
        Self {
            generator,
            cache,
            ttl,
        }
    }

    pub async fn generate_summary(&self, resume: &StructuredResume) -> Result<String, AppError> {
        let resume = tidy_record(resume.clone());
        let resume = &resume;
        self.cached("summary", resume, move || self.fetch_summary(resume))
            .await
    }

    pub async fn enhance_description(
        &self,
        description: &str,
        position: &str,
    ) -> Result<Vec<String>, AppError> {
        let (description, position) = (description.trim(), position.trim());
        self.cached("enhance", &(description, position), move || {
            self.fetch_bullets(description, position)
        })
        .await
    }

    /// Suggested skills never repeat one the candidate already lists.
    pub async fn suggest_skills(
        &self,
        job_title: &str,
        existing_skills: &[String],
    ) -> Result<Vec<String>, AppError> {
        let job_title = job_title.trim();
        let existing = clean_list(existing_skills.iter().map(String::as_str));
        let existing = existing.as_slice();
        self.cached("skills", &(job_title, existing), move || {
            self.fetch_skills(job_title, existing)
        })
        .await
    }

    pub async fn analyze_ats(
        &self,
        resume: &StructuredResume,
        job_description: &str,
    ) -> Result<AtsReport, AppError> {
        let resume = tidy_record(resume.clone());
        let resume = &resume;
        let job_description = job_description.trim();
        self.cached("ats", &(resume, job_description), move || {
            self.fetch_ats(resume, job_description)
        })
        .await
    }

    async fn fetch_summary(&self, resume: &StructuredResume) -> Result<String, AppError> {
        let prompt = SUMMARY_PROMPT_TEMPLATE.replace("{resume_json}", &to_json(resume)?);
        let system = format!("{JSON_ONLY_SYSTEM} {NO_FABRICATION_INSTRUCTION}");
        let reply: SummaryReply = self
            .ask(&prompt, &system, "Summary generation failed")
            .await?;
        let summary = reply.summary.trim().to_string();
        if summary.is_empty() {
            return Err(AppError::Llm("Summary generation returned nothing".to_string()));
        }
        Ok(summary)
    }

    async fn fetch_bullets(
        &self,
        description: &str,
        position: &str,
    ) -> Result<Vec<String>, AppError> {
        let prompt = ENHANCE_PROMPT_TEMPLATE
            .replace("{position}", or_unspecified(position))
            .replace("{description}", description);
        let system =
            format!("{JSON_ONLY_SYSTEM} {NO_FABRICATION_INSTRUCTION} {ATS_STYLE_INSTRUCTION}");
        let reply: BulletsReply = self
            .ask(&prompt, &system, "Description enhancement failed")
            .await?;
        let bullets = clean_list(reply.bullets.iter().map(|b| strip_bullet_marker(b)));
        if bullets.is_empty() {
            return Err(AppError::Llm(
                "Description enhancement returned no bullets".to_string(),
            ));
        }
        Ok(bullets.into_iter().take(MAX_BULLETS).collect())
    }

    async fn fetch_skills(
        &self,
        job_title: &str,
        existing: &[String],
    ) -> Result<Vec<String>, AppError> {
        let listed = if existing.is_empty() {
            "(none)".to_string()
        } else {
            existing.join(", ")
        };
        let prompt = SKILLS_PROMPT_TEMPLATE
            .replace("{job_title}", job_title)
            .replace("{existing_skills}", &listed);
        let reply: SkillsReply = self
            .ask(&prompt, JSON_ONLY_SYSTEM, "Skill suggestion failed")
            .await?;
        Ok(new_skills(reply.skills, existing))
    }

    async fn fetch_ats(
        &self,
        resume: &StructuredResume,
        job_description: &str,
    ) -> Result<AtsReport, AppError> {
        let prompt = ATS_PROMPT_TEMPLATE
            .replace("{job_description}", job_description)
            .replace("{resume_json}", &to_json(resume)?);
        let system = format!("{JSON_ONLY_SYSTEM} {NO_FABRICATION_INSTRUCTION}");
        // Read loosely: models send scores as "85" or "85%" and mix types in lists.
        let reply: Value = self.ask(&prompt, &system, "ATS analysis failed").await?;
        if !reply.is_object() {
            return Err(AppError::Llm(
                "ATS analysis failed: reply is not a JSON object".to_string(),
            ));
        }
        Ok(AtsReport {
            score: clamp_score(score_value(&reply["score"])),
            matched_keywords: text_items(&reply["matchedKeywords"]),
            missing_keywords: text_items(&reply["missingKeywords"]),
            suggestions: text_items(&reply["suggestions"]),
        })
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        context: &str,
    ) -> Result<T, AppError> {
        generate_json(
            self.generator.as_ref(),
            prompt,
            system,
            &GenerationParams::CREATIVE,
        )
        .await
        .map_err(|e| AppError::Llm(format!("{context}: {e}")))
    }

    /// Returns the cached value for `input` or computes and stores it.
    async fn cached<I, T, F, Fut>(&self, kind: &str, input: &I, compute: F) -> Result<T, AppError>
    where
        I: Serialize + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let key = cache_key(kind, input);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!(kind, "AI suggestion cache hit");
                    return Ok(value);
                }
                Err(e) => warn!(kind, error = %e, "Discarding unreadable cache entry"),
            },
            Ok(None) => debug!(kind, "AI suggestion cache miss"),
            Err(e) => warn!(kind, error = %e, "Cache read failed"),
        }

        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, &raw, self.ttl).await {
                    warn!(kind, error = %e, "Cache write failed");
                }
            }
            Err(e) => warn!(kind, error = %e, "Could not serialize AI suggestion for cache"),
        }
        Ok(value)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.into()))
}

fn or_unspecified(value: &str) -> &str {
    if value.is_empty() {
        "(not specified)"
    } else {
        value
    }
}

fn clean_list<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    dedup_case_insensitive(items.into_iter().map(str::trim).filter(|s| !s.is_empty()))
}

fn strip_bullet_marker(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| matches!(c, '-' | '•' | '*' | '–'))
        .trim_start()
}

fn new_skills(suggested: Vec<String>, existing: &[String]) -> Vec<String> {
    let known: Vec<String> = existing.iter().map(|s| s.to_lowercase()).collect();
    clean_list(suggested.iter().map(String::as_str))
        .into_iter()
        .filter(|s| !known.contains(&s.to_lowercase()))
        .take(MAX_SUGGESTED_SKILLS)
        .collect()
}

fn score_value(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// String and number elements of a list; a bare string counts as one item.
fn text_items(v: &Value) -> Vec<String> {
    let items: Vec<String> = match v {
        Value::Array(arr) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    };
    clean_list(items.iter().map(String::as_str))
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
