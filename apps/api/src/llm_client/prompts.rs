// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to writing prompts so the model does not invent facts.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Only use facts present in the input. Do NOT invent employers, \
    dates, degrees, numbers or technologies. If a detail is unknown, leave it out.";

/// Instruction shared by prompts that produce resume content for ATS parsing.
pub const ATS_STYLE_INSTRUCTION: &str = "\
    Write for Applicant Tracking Systems: plain text, no tables, no emojis, \
    start bullets with a strong action verb, keep each bullet under 30 words.";
