use std::sync::Arc;

use crate::ai::AiAssistant;
use crate::config::Config;
use crate::parsing::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction cascade. Runs heuristics only when no AI provider is configured.
    pub parser: Arc<ResumeParser>,
    /// `None` when GEMINI_API_KEY is unset; suggestion routes then answer 503.
    pub assistant: Option<Arc<AiAssistant>>,
}
