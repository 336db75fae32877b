use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ParsingMethod, StructuredResume};
use crate::parsing::cascade::ParseOutcome;
use crate::parsing::document::{extract_text, DocumentKind};
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const UPLOAD_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMeta {
    pub parsing_method: ParsingMethod,
    pub text_length: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub message: String,
    pub data: StructuredResume,
    pub meta: ParseMeta,
}

impl ParseResponse {
    fn from_outcome(outcome: ParseOutcome, text_length: usize) -> Self {
        Self {
            success: true,
            message: outcome.message,
            data: outcome.data,
            meta: ParseMeta {
                parsing_method: outcome.method,
                text_length,
                warnings: outcome.warnings,
            },
        }
    }
}

struct Upload {
    kind: DocumentKind,
    file_name: String,
    bytes: Vec<u8>,
}

/// POST /api/v1/resumes/parse
///
/// Rejects bad uploads; once a file is accepted the response is always a
/// usable record, even when no text could be read from it.
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    parse_upload(state, multipart)
        .instrument(info_span!("resume_upload", %upload_id))
        .await
}

async fn parse_upload(
    state: AppState,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let upload = read_upload(multipart, state.config.max_upload_bytes).await?;
    info!(
        file_name = %upload.file_name,
        kind = upload.kind.as_str(),
        bytes = upload.bytes.len(),
        "Resume upload received"
    );

    let text = match extract_text(upload.kind, upload.bytes).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Text extraction failed, returning empty record");
            let outcome = ParseOutcome::manual(vec![
                "The file could not be read. Please fill in your information manually".to_string(),
            ]);
            return Ok(Json(ParseResponse::from_outcome(outcome, 0)));
        }
    };

    let outcome = state.parser.parse(&text).await;
    info!(method = outcome.method.as_str(), "Resume parsed");
    Ok(Json(ParseResponse::from_outcome(outcome, text.chars().count())))
}

/// POST /api/v1/resumes/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Json<ParseResponse> {
    let outcome = state.parser.parse(&req.text).await;
    info!(method = outcome.method.as_str(), "Pasted resume parsed");
    Json(ParseResponse::from_outcome(outcome, req.text.chars().count()))
}

async fn read_upload(mut multipart: Multipart, max_bytes: usize) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let kind = DocumentKind::detect(field.content_type(), Some(&file_name)).ok_or_else(|| {
            AppError::UnsupportedMediaType("Only PDF, DOCX and TXT files are supported".to_string())
        })?;
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        return Ok(Upload {
            kind,
            file_name,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::Validation(format!(
        "No file uploaded. Send the resume in the '{UPLOAD_FIELD}' field"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File exceeds the {} KB upload limit",
        max_bytes / 1024
    ))
}
