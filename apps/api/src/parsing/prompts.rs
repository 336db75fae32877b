// Resume extraction prompt templates.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are a precise resume data extractor. \
Convert raw resume text into structured JSON. \
You MUST respond with valid JSON only, with no markdown fences and no explanations. \
Copy values as written in the resume. Never guess or invent missing details; \
use an empty string or an empty array instead.";

pub const RESUME_PARSE_PROMPT: &str = r#"Extract the resume below into a JSON object.

RESUME TEXT:
{raw_text}

OUTPUT SCHEMA (return exactly this structure, every key present):
{
  "personalInfo": {
    "fullName": "string",
    "email": "string",
    "phone": "string",
    "location": "string",
    "linkedin": "string",
    "github": "string",
    "website": "string"
  },
  "summary": "string",
  "skills": {
    "technical": ["string"],
    "soft": ["string"],
    "tools": ["string"],
    "languages": ["string"]
  },
  "experience": [
    {
      "company": "string",
      "position": "string",
      "location": "string",
      "startDate": "string",
      "endDate": "string",
      "current": false,
      "description": "string",
      "achievements": ["string"]
    }
  ],
  "education": [
    {
      "institution": "string",
      "degree": "string",
      "field": "string",
      "startDate": "string",
      "endDate": "string",
      "gpa": "string",
      "achievements": ["string"]
    }
  ],
  "projects": [
    {
      "name": "string",
      "description": "string",
      "technologies": ["string"],
      "link": "string",
      "github": "string"
    }
  ],
  "certifications": [
    { "name": "string", "issuer": "string", "date": "string", "link": "string" }
  ]
}

RULES:
- "languages" means spoken languages (English, Spanish, ...), not programming languages.
- Programming languages and frameworks go in "technical"; software, platforms and cloud services go in "tools".
- Keep dates as written ("Jan 2020", "2019"). Set "current" to true and "endDate" to "" for ongoing roles.
- Put bullet points under "achievements"; put remaining prose under "description".
- Use empty strings and empty arrays for anything not present in the text."#;
