//! Heuristic extraction: regex and keyword rules, no AI.
//!
//! Recovers whatever structure it can from plain resume text: contact details
//! from the top of the document, skills from the keyword vocabularies, and
//! entries from recognized sections. The result goes through `tidy_record`,
//! the same cleanup the AI path applies.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{
    Certification, Education, Experience, PersonalInfo, Project, Skills, StructuredResume,
};
use crate::parsing::sanitize::{dedup_case_insensitive, is_present, tidy_record};
use crate::parsing::sections::{heading_of, split_sections, Section, Sections};
use crate::parsing::vocabulary::{self, SkillCategory};

/// How many lines from the top are considered for the name and location.
const HEADER_SCAN_LINES: usize = 6;
const MAX_SUMMARY_CHARS: usize = 1200;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("Invalid email regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\(?\d[\d\s().-]{7,20}\d").expect("Invalid phone regex")
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9_%-]+/?")
        .expect("Invalid linkedin regex")
});

static GITHUB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_-]+(?:/[A-Za-z0-9_.-]+)?")
        .expect("Invalid github regex")
});

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)[^\s,;|()<>]+").expect("Invalid url regex")
});

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let month = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
    let date = format!(r"(?:{month}\s*,?\s*\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)(?P<start>{date})\s*(?:-|–|—|to|until)\s*(?P<end>{date}|present|current|now|ongoing|till date)"
    ))
    .expect("Invalid date range regex")
});

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex"));

static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*,?\s*(?:19|20)\d{2}\b")
        .expect("Invalid month-year regex")
});

static GPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:c?gpa|grade)\s*[:\-]?\s*(?P<gpa>\d+(?:\.\d+)?(?:\s*/\s*\d+(?:\.\d+)?)?)")
        .expect("Invalid gpa regex")
});

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:bachelor(?:'s)?|master(?:'s)?|b\.?sc|m\.?sc|b\.?tech|m\.?tech|b\.s\.|m\.s\.|b\.e\.|b\.a\.|m\.a\.|mba|ph\.?d|doctorate|associate(?:'s)? degree|diploma|high school)")
        .expect("Invalid degree regex")
});

static INSTITUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
        .expect("Invalid institution regex")
});

static JOB_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:engineer|developer|intern|manager|analyst|designer|consultant|lead|architect|scientist|specialist|administrator|officer|director|assistant|associate|coordinator|programmer|technician|head|founder|president|teacher|researcher)s?\b")
        .expect("Invalid job title regex")
});

/// Splits a header line into parts: pipes, bullets, dashes and " at ".
static PART_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\|\s*|\s+[•·@]\s+|\s+[-–—]\s+|\s+at\s+|\t+|\s{3,}")
        .expect("Invalid part separator regex")
});

static CERT_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(?:-|–|—|\||by|from)\s+|,\s+").expect("Invalid certification separator regex")
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z .'-]{1,40},\s*(?:[A-Z]{2}|[A-Z][A-Za-z .'-]{2,40})$")
        .expect("Invalid location regex")
});

static NAME_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z.'-]*$").expect("Invalid name word regex")
});

/// Runs every heuristic over `text` and returns a cleaned-up record.
pub fn extract(text: &str) -> StructuredResume {
    let sections = split_sections(text);

    let record = StructuredResume {
        personal_info: extract_personal_info(text, &sections),
        summary: extract_summary(&sections),
        skills: extract_skills(text, &sections),
        experience: extract_experience(sections.get(Section::Experience)),
        education: extract_education(sections.get(Section::Education)),
        projects: extract_projects(sections.get(Section::Projects)),
        certifications: extract_certifications(sections.get(Section::Certifications)),
    };

    tidy_record(record)
}

// ────────────────────────────────────────────────────────────────────────────
// Contact details
// ────────────────────────────────────────────────────────────────────────────

fn extract_personal_info(text: &str, sections: &Sections) -> PersonalInfo {
    let linkedin = first_match(&LINKEDIN, text);
    let github = first_match(&GITHUB, text);
    let website = URL
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', '/']))
        .find(|u| {
            let lower = u.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .map(String::from)
        .unwrap_or_default();

    let top = top_lines(text, sections);

    PersonalInfo {
        full_name: find_name(&top),
        email: first_match(&EMAIL, text),
        phone: find_phone(text),
        location: find_location(&top),
        linkedin,
        github,
        website,
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First candidate with 10–15 digits; shorter runs are usually dates or years.
fn find_phone(text: &str) -> String {
    PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (10..=15).contains(&digits) && !DATE_RANGE.is_match(candidate)
        })
        .map(String::from)
        .unwrap_or_default()
}

/// Header section lines, or the first lines of the document if no heading exists.
fn top_lines<'a>(text: &'a str, sections: &'a Sections) -> Vec<&'a str> {
    if sections.has(Section::Header) {
        sections
            .get(Section::Header)
            .iter()
            .take(HEADER_SCAN_LINES)
            .map(String::as_str)
            .collect()
    } else {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(HEADER_SCAN_LINES)
            .collect()
    }
}

/// Splits a contact line like "Jane Doe | jane@x.com | Berlin, Germany".
fn contact_segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(['|', '•', '·'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn find_name(top: &[&str]) -> String {
    top.iter()
        .filter(|line| heading_of(line).is_none())
        .filter_map(|line| contact_segments(line).next())
        .find(|segment| looks_like_name(segment))
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn looks_like_name(segment: &str) -> bool {
    if segment.len() > 50 || EMAIL.is_match(segment) || JOB_TITLE.is_match(segment) {
        return false;
    }
    let words: Vec<&str> = segment.split_whitespace().collect();
    (2..=4).contains(&words.len()) && words.iter().all(|w| NAME_WORD.is_match(w))
}

fn find_location(top: &[&str]) -> String {
    top.iter()
        .flat_map(|line| contact_segments(line))
        .find(|segment| {
            LOCATION.is_match(segment) && !segment.chars().any(|c| c.is_ascii_digit())
        })
        .map(String::from)
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Summary & skills
// ────────────────────────────────────────────────────────────────────────────

fn extract_summary(sections: &Sections) -> String {
    let lines = sections.get(Section::Summary);
    let text = if lines.is_empty() {
        // No heading: a long prose line near the top is usually the profile blurb.
        sections
            .get(Section::Header)
            .iter()
            .find(|l| l.split_whitespace().count() >= 12 && !EMAIL.is_match(l))
            .cloned()
            .unwrap_or_default()
    } else {
        lines.join(" ")
    };
    truncate_chars(&collapse_whitespace(&text), MAX_SUMMARY_CHARS)
}

fn extract_skills(text: &str, sections: &Sections) -> Skills {
    let mut skills = Skills::default();

    for m in vocabulary::find_terms(text) {
        if m.category == SkillCategory::Languages {
            continue;
        }
        push_skill(&mut skills, m.category, m.canonical.to_string());
    }

    // Spoken languages only count inside a languages section or a line that
    // mentions languages; elsewhere "English" is more likely a degree subject.
    let language_text = if sections.has(Section::Languages) {
        sections.get(Section::Languages).join("\n")
    } else {
        text.lines()
            .filter(|l| l.to_lowercase().contains("language"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    skills.languages = vocabulary::find_category(&language_text, SkillCategory::Languages);

    for (category, item) in explicit_skills(sections.get(Section::Skills)) {
        push_skill(&mut skills, category, item);
    }

    skills
}

fn push_skill(skills: &mut Skills, category: SkillCategory, item: String) {
    let list = match category {
        SkillCategory::Technical => &mut skills.technical,
        SkillCategory::Tools => &mut skills.tools,
        SkillCategory::Soft => &mut skills.soft,
        SkillCategory::Languages => &mut skills.languages,
    };
    if !list.iter().any(|s| s.eq_ignore_ascii_case(&item)) {
        list.push(item);
    }
}

/// Items listed in the skills section that the vocabulary does not know.
/// A "Label: a, b" line routes its items by label.
fn explicit_skills(lines: &[String]) -> Vec<(SkillCategory, String)> {
    let mut out = Vec::new();
    for line in lines {
        let (label, items) = match line.split_once(':') {
            Some((label, items)) => (label.to_lowercase(), items),
            None => (String::new(), line.as_str()),
        };
        let category = if label.contains("soft") || label.contains("interpersonal") {
            SkillCategory::Soft
        } else if ["tool", "platform", "cloud", "devops", "framework"]
            .iter()
            .any(|k| label.contains(k))
        {
            SkillCategory::Tools
        } else if label.contains("spoken") {
            SkillCategory::Languages
        } else {
            SkillCategory::Technical
        };

        for item in items.split([',', ';', '•', '|']) {
            let item = strip_bullet(item).trim_end_matches('.');
            if item.is_empty()
                || item.len() > 40
                || item.split_whitespace().count() > 4
                || vocabulary::lookup(item).is_some()
                || item.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
            {
                continue;
            }
            out.push((category, item.to_string()));
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

fn extract_experience(lines: &[String]) -> Vec<Experience> {
    let mut entries: Vec<Experience> = Vec::new();
    // Plain lines seen after the current entry's bullets: header of the next entry.
    let mut pending: Vec<String> = Vec::new();
    let mut in_bullets = false;

    for line in lines {
        if is_bullet(line) {
            let Some(entry) = entries.last_mut() else {
                continue;
            };
            flush_into_description(entry, &mut pending);
            entry.achievements.push(strip_bullet(line).to_string());
            in_bullets = true;
            continue;
        }

        if let Some(range) = DATE_RANGE.captures(line) {
            let (start, end) = (range["start"].to_string(), range["end"].to_string());
            let remainder = DATE_RANGE.replace(line, " ");
            let mut entry = Experience {
                current: is_present(&end),
                start_date: start,
                end_date: end,
                ..Default::default()
            };
            for part in pending.drain(..).chain(std::iter::once(remainder.to_string())) {
                for piece in split_parts(&part) {
                    assign_experience_part(&mut entry, piece);
                }
            }
            entries.push(entry);
            in_bullets = false;
            continue;
        }

        match entries.last_mut() {
            Some(entry) if !in_bullets => {
                let fills_gap = entry.position.is_empty() || entry.company.is_empty();
                if fills_gap && line.split_whitespace().count() <= 8 {
                    for piece in split_parts(line) {
                        assign_experience_part(entry, piece);
                    }
                } else {
                    append_sentence(&mut entry.description, line);
                }
            }
            _ => pending.push(line.clone()),
        }
    }

    if let Some(entry) = entries.last_mut() {
        flush_into_description(entry, &mut pending);
    }
    entries
}

fn flush_into_description(entry: &mut Experience, pending: &mut Vec<String>) {
    for line in pending.drain(..) {
        append_sentence(&mut entry.description, &line);
    }
}

fn assign_experience_part(entry: &mut Experience, part: &str) {
    let part = part.trim_matches(|c: char| matches!(c, ',' | '(' | ')' | '-' | '–')).trim();
    if part.is_empty() {
        return;
    }
    if entry.position.is_empty() && JOB_TITLE.is_match(part) {
        entry.position = part.to_string();
    } else if entry.company.is_empty() {
        match part.split_once(", ") {
            Some((company, place)) if entry.location.is_empty() && looks_like_place(place) => {
                entry.company = company.trim().to_string();
                entry.location = place.trim().to_string();
            }
            _ => entry.company = part.to_string(),
        }
    } else if entry.location.is_empty() {
        entry.location = part.to_string();
    } else if entry.position.is_empty() {
        entry.position = part.to_string();
    }
}

fn looks_like_place(s: &str) -> bool {
    let words: Vec<&str> = s.split_whitespace().collect();
    (1..=3).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
}

fn split_parts(line: &str) -> Vec<&str> {
    PART_SEPARATOR
        .split(line)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

fn extract_education(lines: &[String]) -> Vec<Education> {
    let mut entries: Vec<Education> = Vec::new();

    for line in lines {
        if is_bullet(line) {
            if let Some(entry) = entries.last_mut() {
                entry.achievements.push(strip_bullet(line).to_string());
            }
            continue;
        }

        let mut rest = line.to_string();
        let mut start_date = String::new();
        let mut end_date = String::new();
        if let Some(c) = DATE_RANGE.captures(line) {
            start_date = c["start"].to_string();
            end_date = c["end"].to_string();
            rest = DATE_RANGE.replace(&rest, " ").to_string();
        } else if let Some(m) = MONTH_YEAR.find(line).or_else(|| YEAR.find(line)) {
            end_date = m.as_str().to_string();
            rest = rest.replace(m.as_str(), " ");
        }

        let gpa = GPA
            .captures(&rest)
            .map(|c| c["gpa"].replace(' ', ""))
            .unwrap_or_default();
        if !gpa.is_empty() {
            rest = GPA.replace(&rest, " ").to_string();
        }

        let has_degree = DEGREE.is_match(&rest);
        let has_institution = INSTITUTION.is_match(&rest);

        let starts_new = match entries.last() {
            None => true,
            Some(last) => {
                (has_institution && !last.institution.is_empty())
                    || (has_degree && !last.degree.is_empty())
            }
        };
        if starts_new && (has_degree || has_institution || !end_date.is_empty()) {
            entries.push(Education::default());
        }
        let Some(entry) = entries.last_mut() else {
            continue;
        };

        if entry.start_date.is_empty() {
            entry.start_date = start_date;
        }
        if entry.end_date.is_empty() {
            entry.end_date = end_date;
        }
        if entry.gpa.is_empty() {
            entry.gpa = gpa;
        }

        let mut last_kind = PartKind::Unknown;
        for part in rest.split(['|', ',', ';']).flat_map(|p| split_parts(p)) {
            let part = part.trim_matches(|c: char| matches!(c, '(' | ')' | '-' | '–')).trim();
            if part.is_empty() {
                continue;
            }
            if INSTITUTION.is_match(part) && entry.institution.is_empty() {
                entry.institution = part.to_string();
                last_kind = PartKind::Institution;
            } else if DEGREE.is_match(part) && entry.degree.is_empty() {
                let (degree, field) = split_degree(part);
                entry.degree = degree;
                if entry.field.is_empty() {
                    entry.field = field;
                }
                last_kind = PartKind::Degree;
            } else if last_kind == PartKind::Degree && entry.field.is_empty() {
                entry.field = part.to_string();
            } else if last_kind == PartKind::Institution {
                entry.institution = format!("{}, {}", entry.institution, part);
            } else if entry.institution.is_empty() && !entry.degree.is_empty() {
                entry.institution = part.to_string();
            }
        }
    }

    entries
}

#[derive(PartialEq)]
enum PartKind {
    Unknown,
    Degree,
    Institution,
}

/// "Bachelor of Science in Computer Science" → ("Bachelor of Science", "Computer Science").
fn split_degree(part: &str) -> (String, String) {
    for sep in [" in ", " In ", " - "] {
        if let Some((degree, field)) = part.split_once(sep) {
            return (degree.trim().to_string(), field.trim().to_string());
        }
    }
    (part.to_string(), String::new())
}

// ────────────────────────────────────────────────────────────────────────────
// Projects & certifications
// ────────────────────────────────────────────────────────────────────────────

fn extract_projects(lines: &[String]) -> Vec<Project> {
    let mut projects: Vec<(Project, String)> = Vec::new();

    for line in lines {
        let (without_urls, github, link) = take_urls(line);

        if let Some((project, block)) = projects.last_mut() {
            if let Some(stack) = technologies_line(&without_urls) {
                project.technologies.extend(stack);
                block.push('\n');
                block.push_str(line);
                continue;
            }
            let is_prose = is_bullet(line)
                || (project.description.is_empty() && without_urls.split_whitespace().count() > 8);
            if is_prose || without_urls.trim().is_empty() {
                append_sentence(&mut project.description, strip_bullet(&without_urls));
                set_if_empty(&mut project.github, github);
                set_if_empty(&mut project.link, link);
                block.push('\n');
                block.push_str(line);
                continue;
            }
        } else if is_bullet(line) {
            continue;
        }

        let parts = split_parts(&without_urls);
        let Some((name, rest)) = parts.split_first() else {
            continue;
        };
        let mut project = Project {
            name: name.trim_end_matches(':').to_string(),
            github,
            link,
            ..Default::default()
        };
        let rest = rest.join(" ");
        if !rest.is_empty() && vocabulary::find_terms(&rest).is_empty() {
            project.description = rest;
        }
        projects.push((project, line.clone()));
    }

    projects
        .into_iter()
        .map(|(mut project, block)| {
            let mut techs = std::mem::take(&mut project.technologies);
            techs.extend(
                vocabulary::find_terms(&block)
                    .into_iter()
                    .filter(|m| matches!(m.category, SkillCategory::Technical | SkillCategory::Tools))
                    .map(|m| m.canonical.to_string()),
            );
            project.technologies = dedup_case_insensitive(techs.iter().map(String::as_str));
            project
        })
        .collect()
}

/// "Technologies: React, Node" style lines.
fn technologies_line(line: &str) -> Option<Vec<String>> {
    let (label, items) = line.split_once(':')?;
    let label = strip_bullet(label).to_lowercase();
    let is_stack = ["tech", "stack", "built with", "tools"]
        .iter()
        .any(|k| label.contains(k));
    if !is_stack {
        return None;
    }
    Some(
        items
            .split([',', ';', '|'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// Removes URLs from a line, returning (rest, github url, other url).
fn take_urls(line: &str) -> (String, String, String) {
    let mut github = String::new();
    let mut link = String::new();
    for m in URL.find_iter(line).chain(GITHUB.find_iter(line)) {
        let url = m.as_str().trim_end_matches('.');
        if url.to_lowercase().contains("github.com") {
            set_if_empty(&mut github, url.to_string());
        } else {
            set_if_empty(&mut link, url.to_string());
        }
    }
    let rest = GITHUB.replace_all(&URL.replace_all(line, " "), " ").to_string();
    (rest, github, link)
}

fn extract_certifications(lines: &[String]) -> Vec<Certification> {
    lines
        .iter()
        .filter_map(|line| {
            let (rest, github, link) = take_urls(strip_bullet(line));
            let mut rest = rest;
            let mut date = String::new();
            if let Some(m) = MONTH_YEAR.find(&rest).or_else(|| YEAR.find(&rest)) {
                date = m.as_str().to_string();
                rest = rest.replace(m.as_str(), " ");
            }
            let rest = rest
                .trim()
                .trim_matches(|c: char| matches!(c, ',' | '(' | ')' | '-' | '–' | '|'))
                .trim();
            if rest.is_empty() {
                return None;
            }
            let mut pieces = CERT_SEPARATOR.splitn(rest, 2);
            let name = pieces.next().unwrap_or_default().trim().to_string();
            let issuer = pieces
                .next()
                .unwrap_or_default()
                .trim_matches(|c: char| matches!(c, '(' | ')' | ','))
                .trim()
                .to_string();
            Some(Certification {
                name,
                issuer,
                date,
                link: if link.is_empty() { github } else { link },
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

const BULLETS: &[char] = &['•', '-', '*', '▪', '◦', '·', '‣', '●', '–', '>'];

fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLETS)
}

fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(BULLETS).trim()
}

fn append_sentence(target: &mut String, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

fn set_if_empty(target: &mut String, value: String) {
    if target.is_empty() {
        *target = value;
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Jane Doe
Berlin, Germany | jane.doe@example.com | +49 151 2345 6789
linkedin.com/in/janedoe | https://github.com/janedoe | https://janedoe.dev

SUMMARY
Backend engineer with 6 years of experience building APIs
in Python and Rust.

EXPERIENCE
Senior Software Engineer at Acme Corp | Jan 2021 - Present
• Cut p99 latency by 40% with Redis caching
• Led migration to Kubernetes
Globex, Munich | 2017 - 2020
Backend Developer
• Built REST services in Java

EDUCATION
Technical University of Munich | B.Sc. in Computer Science | 2013 - 2017 | GPA: 3.7/4.0

SKILLS
Programming: Python, Rust, Java, Haskell
Soft skills: Leadership, Communication, Negotiation

PROJECTS
Folio | resume builder https://folio.app
- Built with React and Node.js
Technologies: Docker, Terraform

CERTIFICATIONS
AWS Certified Solutions Architect - Amazon Web Services (2022)

LANGUAGES
English, German
";

    #[test]
    fn test_email_and_known_skill() {
        let r = extract("contact: jane@x.com\nfive years of JavaScript");
        assert_eq!(r.personal_info.email, "jane@x.com");
        assert!(r.skills.technical.contains(&"JavaScript".to_string()));
    }

    #[test]
    fn test_personal_info() {
        let p = extract(SAMPLE).personal_info;
        assert_eq!(p.full_name, "Jane Doe");
        assert_eq!(p.email, "jane.doe@example.com");
        assert_eq!(p.phone, "+49 151 2345 6789");
        assert_eq!(p.location, "Berlin, Germany");
        assert_eq!(p.linkedin, "linkedin.com/in/janedoe");
        assert_eq!(p.github, "https://github.com/janedoe");
        assert_eq!(p.website, "https://janedoe.dev");
    }

    #[test]
    fn test_summary_is_joined() {
        let r = extract(SAMPLE);
        assert_eq!(
            r.summary,
            "Backend engineer with 6 years of experience building APIs in Python and Rust."
        );
    }

    #[test]
    fn test_experience_entries() {
        let r = extract(SAMPLE);
        assert_eq!(r.experience.len(), 2);

        let first = &r.experience[0];
        assert_eq!(first.position, "Senior Software Engineer");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.start_date, "Jan 2021");
        assert!(first.current);
        assert_eq!(first.achievements.len(), 2);

        let second = &r.experience[1];
        assert_eq!(second.company, "Globex");
        assert_eq!(second.location, "Munich");
        assert_eq!(second.position, "Backend Developer");
        assert_eq!(second.end_date, "2020");
        assert!(!second.current);
        assert_eq!(second.achievements, vec!["Built REST services in Java"]);
    }

    #[test]
    fn test_education_entry() {
        let r = extract(SAMPLE);
        assert_eq!(r.education.len(), 1);
        let edu = &r.education[0];
        assert_eq!(edu.institution, "Technical University of Munich");
        assert_eq!(edu.degree, "B.Sc.");
        assert_eq!(edu.field, "Computer Science");
        assert_eq!(edu.start_date, "2013");
        assert_eq!(edu.end_date, "2017");
        assert_eq!(edu.gpa, "3.7/4.0");
    }

    #[test]
    fn test_skills_by_category() {
        let s = extract(SAMPLE).skills;
        for expected in ["Python", "Rust", "Java", "Redis", "REST", "React", "Node.js"] {
            assert!(s.technical.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(s.technical.contains(&"Haskell".to_string()));
        assert!(s.tools.contains(&"Kubernetes".to_string()));
        assert!(s.tools.contains(&"AWS".to_string()));
        assert!(s.soft.contains(&"Leadership".to_string()));
        assert!(s.soft.contains(&"Negotiation".to_string()));
        assert_eq!(s.languages, vec!["English", "German"]);
    }

    #[test]
    fn test_projects() {
        let r = extract(SAMPLE);
        assert_eq!(r.projects.len(), 1);
        let p = &r.projects[0];
        assert_eq!(p.name, "Folio");
        assert_eq!(p.link, "https://folio.app");
        assert_eq!(p.description, "resume builder Built with React and Node.js");
        for tech in ["Docker", "Terraform", "React", "Node.js"] {
            assert!(p.technologies.contains(&tech.to_string()), "missing {tech}");
        }
    }

    #[test]
    fn test_certifications() {
        let r = extract(SAMPLE);
        assert_eq!(r.certifications.len(), 1);
        let c = &r.certifications[0];
        assert_eq!(c.name, "AWS Certified Solutions Architect");
        assert_eq!(c.issuer, "Amazon Web Services");
        assert_eq!(c.date, "2022");
    }

    #[test]
    fn test_garbage_yields_nothing_meaningful() {
        for input in ["", "   \n\n", "@@@ ### !!! 12 34", "lorem ipsum dolor sit amet"] {
            assert!(!extract(input).has_meaningful_content(), "input {input:?}");
        }
    }

    #[test]
    fn test_years_are_not_phone_numbers() {
        assert_eq!(find_phone("2015 - 2019"), "");
        assert_eq!(find_phone("Call (555) 123-4567"), "(555) 123-4567");
    }

    #[test]
    fn test_name_skips_job_titles_and_headings() {
        assert_eq!(find_name(&["Software Engineer", "Alan Turing"]), "Alan Turing");
        assert_eq!(find_name(&["jane doe"]), "");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
