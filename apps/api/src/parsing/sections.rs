//! Splits resume text into sections by recognizing heading lines.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Lines before the first recognized heading (name, contact details).
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    /// A recognized heading we do not extract (awards, hobbies, ...).
    Other,
}

const HEADINGS: &[(Section, &[&str])] = &[
    (
        Section::Summary,
        &[
            "summary",
            "professional summary",
            "career summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about me",
            "about",
        ],
    ),
    (
        Section::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "relevant experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "internships",
        ],
    ),
    (
        Section::Education,
        &[
            "education",
            "academic background",
            "educational background",
            "academics",
            "education and training",
            "qualifications",
        ],
    ),
    (
        Section::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core skills",
            "core competencies",
            "competencies",
            "technologies",
            "skills and tools",
            "tech stack",
        ],
    ),
    (
        Section::Projects,
        &[
            "projects",
            "personal projects",
            "academic projects",
            "key projects",
            "selected projects",
        ],
    ),
    (
        Section::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses and certifications",
            "certifications and courses",
            "courses",
        ],
    ),
    (Section::Languages, &["languages", "spoken languages"]),
    (
        Section::Other,
        &[
            "awards",
            "honors",
            "honors and awards",
            "achievements",
            "interests",
            "hobbies",
            "references",
            "volunteering",
            "volunteer experience",
            "publications",
            "activities",
            "extracurricular activities",
        ],
    ),
];

/// Resume text grouped by section. Repeated headings append to the same section.
#[derive(Debug, Default)]
pub struct Sections {
    lines: HashMap<Section, Vec<String>>,
}

impl Sections {
    pub fn get(&self, section: Section) -> &[String] {
        self.lines.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, section: Section) -> bool {
        !self.get(section).is_empty()
    }

    fn push(&mut self, section: Section, line: &str) {
        self.lines
            .entry(section)
            .or_default()
            .push(line.to_string());
    }
}

/// Groups non-empty, trimmed lines under the most recent heading.
///
/// A heading followed by a colon and content on the same line
/// ("Skills: Rust, Go") opens the section and keeps the content.
pub fn split_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current = Section::Header;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(section) = heading_of(line) {
            current = section;
            continue;
        }
        if let Some((label, rest)) = line.split_once(':') {
            if let Some(section) = inline_heading_of(label, current) {
                current = section;
                let rest = rest.trim();
                if !rest.is_empty() {
                    sections.push(current, rest);
                }
                continue;
            }
        }
        sections.push(current, line);
    }

    sections
}

/// Returns the section a line introduces, if it is a heading.
pub fn heading_of(line: &str) -> Option<Section> {
    let normalized = normalize_heading(line);
    if normalized.is_empty() || normalized.split(' ').count() > 5 {
        return None;
    }
    HEADINGS
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(section, _)| *section)
}

/// Entries in these sections carry their own "Technologies: ..." lines.
const ENTRY_SECTIONS: &[Section] = &[Section::Projects, Section::Experience];

/// Labels that, inside an entry section, describe the entry instead of opening a section.
const ENTRY_LABELS: &[&str] = &["technologies", "tech stack", "skills and tools"];

fn inline_heading_of(label: &str, current: Section) -> Option<Section> {
    let section = heading_of(label)?;
    if ENTRY_SECTIONS.contains(&current)
        && ENTRY_LABELS.contains(&normalize_heading(label).as_str())
    {
        return None;
    }
    Some(section)
}

/// Lowercases, drops decoration and trailing colons, maps `&` to `and`.
fn normalize_heading(line: &str) -> String {
    let trimmed = line
        .trim()
        .trim_end_matches(':')
        .trim_matches(|c: char| matches!(c, '#' | '*' | '=' | '-' | '_' | '|' | '•'))
        .trim();
    trimmed
        .replace('&', " and ")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_variants() {
        assert_eq!(heading_of("WORK EXPERIENCE"), Some(Section::Experience));
        assert_eq!(heading_of("Education:"), Some(Section::Education));
        assert_eq!(heading_of("## Skills & Tools"), Some(Section::Skills));
        assert_eq!(heading_of("--- Projects ---"), Some(Section::Projects));
        assert_eq!(heading_of("Licenses & Certifications"), Some(Section::Certifications));
        assert_eq!(heading_of("Hobbies"), Some(Section::Other));
    }

    #[test]
    fn test_sentences_are_not_headings() {
        assert_eq!(heading_of("Experience building distributed systems"), None);
        assert_eq!(heading_of(""), None);
    }

    #[test]
    fn test_split_sections_groups_lines() {
        let text = "Jane Doe\njane@x.com\n\nSUMMARY\nBackend engineer.\n\nSkills: Rust, Go\nDocker\nEXPERIENCE\nAcme 2020 - 2021\n";
        let s = split_sections(text);
        assert_eq!(s.get(Section::Header), ["Jane Doe", "jane@x.com"]);
        assert_eq!(s.get(Section::Summary), ["Backend engineer."]);
        assert_eq!(s.get(Section::Skills), ["Rust, Go", "Docker"]);
        assert_eq!(s.get(Section::Experience), ["Acme 2020 - 2021"]);
        assert!(!s.has(Section::Education));
    }

    #[test]
    fn test_technologies_line_stays_in_project() {
        let s = split_sections("Projects\nFolio\nTechnologies: Rust, Axum\nSkills: Go");
        assert_eq!(s.get(Section::Projects), ["Folio", "Technologies: Rust, Axum"]);
        assert_eq!(s.get(Section::Skills), ["Go"]);
    }

    #[test]
    fn test_repeated_headings_append() {
        let s = split_sections("Projects\nA\nHobbies\nchess\nProjects\nB");
        assert_eq!(s.get(Section::Projects), ["A", "B"]);
        assert_eq!(s.get(Section::Other), ["chess"]);
    }
}
