//! Validation/defaulting: coerces arbitrary JSON into a `StructuredResume`.
//!
//! `sanitize_resume` only fixes the shape. It is total (never fails), and a
//! record that is already type-correct comes back unchanged.
//!
//! Coercion rules:
//! - numbers become their decimal text; other non-strings → `""`
//! - string lists keep their string elements; a bare string is split on
//!   commas/newlines
//! - entry lists keep object elements
//! - snake_case keys and common synonyms are accepted on input
//!
//! `tidy_record` is the cleanup both extraction layers apply afterwards:
//! trimming, list dedup, `current` inference and pruning of empty entries.

use serde_json::{Map, Value};

use crate::models::resume::{
    Certification, Education, Experience, PersonalInfo, Project, Skills, StructuredResume,
};

type Object = Map<String, Value>;

const PERSONAL_INFO_KEYS: &[&str] = &["personalInfo", "personal_info", "contact", "contactInfo"];
const SUMMARY_KEYS: &[&str] = &[
    "summary",
    "professionalSummary",
    "professional_summary",
    "objective",
    "profile",
];

const PRESENT_MARKERS: &[&str] = &["present", "current", "now", "ongoing", "till date", "today"];

/// Coerces any JSON value into the fixed resume schema.
pub fn sanitize_resume(value: &Value) -> StructuredResume {
    let Some(root) = value.as_object() else {
        return StructuredResume::default();
    };

    let nested = PERSONAL_INFO_KEYS
        .iter()
        .find_map(|k| root.get(*k).and_then(Value::as_object));
    let sources: Vec<&Object> = nested.into_iter().chain(std::iter::once(root)).collect();

    StructuredResume {
        personal_info: sanitize_personal_info(&sources),
        summary: text_field(root, SUMMARY_KEYS),
        skills: root.get("skills").map(sanitize_skills).unwrap_or_default(),
        experience: entries(
            root,
            &["experience", "workExperience", "work_experience"],
            sanitize_experience,
        ),
        education: entries(root, &["education"], sanitize_education),
        projects: entries(root, &["projects"], sanitize_project),
        certifications: certifications(root),
    }
}

fn sanitize_personal_info(sources: &[&Object]) -> PersonalInfo {
    let get = |keys: &[&str]| {
        sources
            .iter()
            .map(|o| string_field(o, keys))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    };
    PersonalInfo {
        full_name: get(&["fullName", "full_name", "name"]),
        email: get(&["email", "emailAddress", "email_address"]),
        phone: get(&["phone", "phoneNumber", "phone_number", "mobile"]),
        location: get(&["location", "address", "city"]),
        linkedin: get(&["linkedin", "linkedIn", "linkedinUrl", "linkedin_url"]),
        github: get(&["github", "gitHub", "githubUrl", "github_url"]),
        website: get(&["website", "portfolio", "personalWebsite", "personal_website"]),
    }
}

fn sanitize_skills(value: &Value) -> Skills {
    match value {
        Value::Object(o) => Skills {
            technical: list_field(
                o,
                &[
                    "technical",
                    "technicalSkills",
                    "technical_skills",
                    "programmingLanguages",
                    "programming_languages",
                ],
            ),
            soft: list_field(o, &["soft", "softSkills", "soft_skills"]),
            tools: list_field(
                o,
                &["tools", "frameworks", "toolsAndTechnologies", "tools_and_technologies"],
            ),
            languages: list_field(o, &["languages", "spokenLanguages", "spoken_languages"]),
        },
        other => Skills {
            technical: string_list(other),
            ..Default::default()
        },
    }
}

fn sanitize_experience(o: &Object) -> Experience {
    Experience {
        company: string_field(o, &["company", "employer", "organization"]),
        position: string_field(o, &["position", "title", "role", "jobTitle", "job_title"]),
        location: string_field(o, &["location"]),
        start_date: string_field(o, &["startDate", "start_date", "from"]),
        end_date: string_field(o, &["endDate", "end_date", "to"]),
        current: bool_field(o, &["current", "isCurrent", "is_current"]),
        description: text_field(o, &["description", "summary"]),
        achievements: list_field(
            o,
            &["achievements", "highlights", "responsibilities", "bullets"],
        ),
    }
}

fn sanitize_education(o: &Object) -> Education {
    Education {
        institution: string_field(o, &["institution", "school", "university", "college"]),
        degree: string_field(o, &["degree", "qualification"]),
        field: string_field(o, &["field", "fieldOfStudy", "field_of_study", "major"]),
        start_date: string_field(o, &["startDate", "start_date", "from"]),
        end_date: string_field(o, &["endDate", "end_date", "to", "graduationDate", "year"]),
        gpa: string_field(o, &["gpa", "cgpa", "grade"]),
        achievements: list_field(o, &["achievements", "honors", "highlights"]),
    }
}

fn sanitize_project(o: &Object) -> Project {
    Project {
        name: string_field(o, &["name", "title"]),
        description: text_field(o, &["description", "summary"]),
        technologies: list_field(
            o,
            &["technologies", "techStack", "tech_stack", "stack", "tools"],
        ),
        link: string_field(o, &["link", "url", "demo", "liveUrl", "live_url"]),
        github: string_field(o, &["github", "githubUrl", "github_url", "repository", "repo"]),
    }
}

fn sanitize_certification(o: &Object) -> Certification {
    Certification {
        name: string_field(o, &["name", "title", "certification"]),
        issuer: string_field(
            o,
            &["issuer", "organization", "issuingOrganization", "authority"],
        ),
        date: string_field(o, &["date", "issueDate", "issue_date", "dateIssued"]),
        link: string_field(o, &["link", "url", "credentialUrl", "credential_url"]),
    }
}

/// Certifications additionally accept bare strings as names.
fn certifications(root: &Object) -> Vec<Certification> {
    let Some(value) = first_present(root, &["certifications", "certificates"]) else {
        return Vec::new();
    };
    let items: Vec<&Value> = match value {
        Value::Array(arr) => arr.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(o) => Some(sanitize_certification(o)),
            Value::String(s) if !s.trim().is_empty() => Some(Certification {
                name: s.trim().to_string(),
                ..Default::default()
            }),
            _ => None,
        })
        .collect()
}

fn entries<T, F>(root: &Object, keys: &[&str], build: F) -> Vec<T>
where
    F: Fn(&Object) -> T,
{
    let Some(value) = first_present(root, keys) else {
        return Vec::new();
    };
    let items: Vec<&Value> = match value {
        Value::Array(arr) => arr.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(Value::as_object)
        .map(build)
        .collect()
}

fn first_present<'a>(o: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| o.get(*k).filter(|v| !v.is_null()))
}

/// First non-empty coerced string among `keys`.
fn string_field(o: &Object, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| o.get(*k))
        .map(coerce_string)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Like `string_field`, but an array of strings is joined into one paragraph.
fn text_field(o: &Object, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| o.get(*k))
        .map(|v| match v {
            Value::Array(arr) => arr
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            other => coerce_string(other),
        })
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn list_field(o: &Object, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|k| o.get(*k))
        .map(string_list)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}

fn bool_field(o: &Object, keys: &[&str]) -> bool {
    keys.iter().filter_map(|k| o.get(*k)).any(|v| match v {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        _ => false,
    })
}

fn coerce_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn string_list(v: &Value) -> Vec<String> {
    match v {
        Value::Array(arr) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Value::String(s) => s
            .split(|c| matches!(c, ',' | '\n' | ';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cleanup
// ────────────────────────────────────────────────────────────────────────────

/// Trims every string, dedups lists case-insensitively, marks experience
/// ending in "Present" as current, and drops entries left with no text.
/// Idempotent.
pub fn tidy_record(record: StructuredResume) -> StructuredResume {
    let StructuredResume {
        personal_info: p,
        summary,
        skills,
        experience,
        education,
        projects,
        certifications,
    } = record;

    StructuredResume {
        personal_info: PersonalInfo {
            full_name: trimmed(p.full_name),
            email: trimmed(p.email),
            phone: trimmed(p.phone),
            location: trimmed(p.location),
            linkedin: trimmed(p.linkedin),
            github: trimmed(p.github),
            website: trimmed(p.website),
        },
        summary: trimmed(summary),
        skills: Skills {
            technical: tidy_list(&skills.technical),
            soft: tidy_list(&skills.soft),
            tools: tidy_list(&skills.tools),
            languages: tidy_list(&skills.languages),
        },
        experience: experience
            .into_iter()
            .map(tidy_experience)
            .filter(has_experience_text)
            .collect(),
        education: education
            .into_iter()
            .map(tidy_education)
            .filter(|e| *e != Education::default())
            .collect(),
        projects: projects
            .into_iter()
            .map(tidy_project)
            .filter(|p| *p != Project::default())
            .collect(),
        certifications: certifications
            .into_iter()
            .map(tidy_certification)
            .filter(|c| *c != Certification::default())
            .collect(),
    }
}

fn tidy_experience(e: Experience) -> Experience {
    let end_date = trimmed(e.end_date);
    Experience {
        company: trimmed(e.company),
        position: trimmed(e.position),
        location: trimmed(e.location),
        start_date: trimmed(e.start_date),
        current: e.current || is_present(&end_date),
        end_date,
        description: trimmed(e.description),
        achievements: tidy_list(&e.achievements),
    }
}

/// `current` alone does not make an entry.
fn has_experience_text(e: &Experience) -> bool {
    *e != Experience {
        current: e.current,
        ..Default::default()
    }
}

fn tidy_education(e: Education) -> Education {
    Education {
        institution: trimmed(e.institution),
        degree: trimmed(e.degree),
        field: trimmed(e.field),
        start_date: trimmed(e.start_date),
        end_date: trimmed(e.end_date),
        gpa: trimmed(e.gpa),
        achievements: tidy_list(&e.achievements),
    }
}

fn tidy_project(p: Project) -> Project {
    Project {
        name: trimmed(p.name),
        description: trimmed(p.description),
        technologies: tidy_list(&p.technologies),
        link: trimmed(p.link),
        github: trimmed(p.github),
    }
}

fn tidy_certification(c: Certification) -> Certification {
    Certification {
        name: trimmed(c.name),
        issuer: trimmed(c.issuer),
        date: trimmed(c.date),
        link: trimmed(c.link),
    }
}

fn trimmed(s: String) -> String {
    s.trim().to_string()
}

fn tidy_list(items: &[String]) -> Vec<String> {
    dedup_case_insensitive(items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()))
}

/// Keeps the first spelling of each case-insensitively distinct value.
pub fn dedup_case_insensitive<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(String::from)
        .collect()
}

pub fn is_present(date: &str) -> bool {
    let d = date.trim().to_lowercase();
    PRESENT_MARKERS.iter().any(|m| d == *m)
}
