// Suggestion prompt templates.
// System prompts are assembled at call time from the shared fragments in
// llm_client::prompts.

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a professional resume summary for the candidate below.

CANDIDATE (JSON):
{resume_json}

Requirements:
- 3 to 4 sentences, 50 to 80 words, first person implied (no "I").
- Lead with the candidate's role and years or level of experience when known.
- Mention the 3 to 5 most relevant skills and one concrete achievement.

Return exactly: {"summary": "string"}"#;

pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Rewrite the job description below into strong resume bullet points.

POSITION: {position}

ORIGINAL DESCRIPTION:
{description}

Requirements:
- 3 to 5 bullets, each a single sentence.
- Keep every fact, number and technology from the original; add none.
- Do not start bullets with "-" or "•".

Return exactly: {"bullets": ["string"]}"#;

pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Suggest skills a candidate applying for the role below should list on their resume.

JOB TITLE: {job_title}

SKILLS ALREADY LISTED:
{existing_skills}

Requirements:
- Up to 10 skills that are commonly expected for this role.
- Do not repeat any skill already listed.
- Use the canonical spelling of each skill ("JavaScript", "PostgreSQL").

Return exactly: {"skills": ["string"]}"#;

pub const ATS_PROMPT_TEMPLATE: &str = r#"Score how well the resume below matches the job description, as an Applicant Tracking System would.

JOB DESCRIPTION:
{job_description}

RESUME (JSON):
{resume_json}

Requirements:
- "score" is an integer from 0 to 100.
- "matchedKeywords" are important job-description keywords present in the resume.
- "missingKeywords" are important job-description keywords absent from the resume.
- "suggestions" are 3 to 5 concrete edits that would raise the score.

Return exactly:
{"score": 0, "matchedKeywords": ["string"], "missingKeywords": ["string"], "suggestions": ["string"]}"#;
