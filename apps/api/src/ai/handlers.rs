//! Axum route handlers for the AI suggestion API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::suggestions::{AiAssistant, AtsReport};
use crate::errors::AppError;
use crate::parsing::sanitize::{sanitize_resume, tidy_record};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `resume` is taken as raw JSON and coerced, so `"gpa": 3.8` is accepted.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub resume: Value,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub existing_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct BulletsData {
    pub bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillsData {
    pub skills: Vec<String>,
}

fn respond<T>(data: T) -> Json<SuggestionResponse<T>> {
    Json(SuggestionResponse {
        success: true,
        data,
    })
}

fn assistant(state: &AppState) -> Result<&AiAssistant, AppError> {
    state.assistant.as_deref().ok_or(AppError::AiUnavailable)
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<SuggestionResponse<SummaryData>>, AppError> {
    let resume = tidy_record(sanitize_resume(&req.resume));
    if !resume.has_meaningful_content() {
        return Err(AppError::Validation(
            "Resume needs at least a name, skills or experience to summarize".to_string(),
        ));
    }
    let summary = assistant(&state)?.generate_summary(&resume).await?;
    Ok(respond(SummaryData { summary }))
}

/// POST /api/v1/ai/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<SuggestionResponse<BulletsData>>, AppError> {
    require(&req.description, "description")?;
    let bullets = assistant(&state)?
        .enhance_description(&req.description, &req.position)
        .await?;
    Ok(respond(BulletsData { bullets }))
}

/// POST /api/v1/ai/skills
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsRequest>,
) -> Result<Json<SuggestionResponse<SkillsData>>, AppError> {
    require(&req.job_title, "jobTitle")?;
    let skills = assistant(&state)?
        .suggest_skills(&req.job_title, &req.existing_skills)
        .await?;
    Ok(respond(SkillsData { skills }))
}

/// POST /api/v1/ai/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(req): Json<AtsRequest>,
) -> Result<Json<SuggestionResponse<AtsReport>>, AppError> {
    require(&req.job_description, "jobDescription")?;
    let resume = sanitize_resume(&req.resume);
    let report = assistant(&state)?
        .analyze_ats(&resume, &req.job_description)
        .await?;
    Ok(respond(report))
}
