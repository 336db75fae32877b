//! Keyword vocabularies for heuristic skill detection.
//!
//! Terms are matched case-insensitively on token boundaries, except short
//! all-caps acronyms (SQL, AWS, C++) which must match their exact case so
//! prose like "the rest of" does not yield "REST".

use once_cell::sync::Lazy;
use regex::Regex;

pub const TECHNICAL_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Rust",
    "Go",
    "Scala",
    "Perl",
    "Dart",
    "SQL",
    "HTML",
    "CSS",
    "Sass",
    "React",
    "React Native",
    "Angular",
    "Vue.js",
    "Next.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "FastAPI",
    "Spring Boot",
    "Ruby on Rails",
    ".NET",
    "GraphQL",
    "REST",
    "Redux",
    "jQuery",
    "Tailwind CSS",
    "Bootstrap",
    "Flutter",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Scikit-learn",
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "SQLite",
    "Elasticsearch",
    "Firebase",
    "Microservices",
];

pub const TOOLS: &[&str] = &[
    "Git",
    "GitHub",
    "GitLab",
    "Bitbucket",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Google Cloud",
    "Jenkins",
    "GitHub Actions",
    "CI/CD",
    "Terraform",
    "Ansible",
    "Kafka",
    "RabbitMQ",
    "Nginx",
    "Linux",
    "Jira",
    "Confluence",
    "Figma",
    "Postman",
    "Webpack",
    "Vite",
    "VS Code",
    "Heroku",
    "Vercel",
    "Netlify",
    "Tableau",
    "Power BI",
    "Excel",
];

pub const SOFT_SKILLS: &[&str] = &[
    "Leadership",
    "Communication",
    "Teamwork",
    "Collaboration",
    "Problem Solving",
    "Critical Thinking",
    "Time Management",
    "Adaptability",
    "Creativity",
    "Mentoring",
    "Project Management",
    "Agile",
    "Scrum",
    "Public Speaking",
    "Attention to Detail",
];

pub const SPOKEN_LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Dutch",
    "Russian",
    "Arabic",
    "Hindi",
    "Bengali",
    "Urdu",
    "Tamil",
    "Telugu",
    "Marathi",
    "Mandarin",
    "Cantonese",
    "Chinese",
    "Japanese",
    "Korean",
];

/// Alternative spellings folded into a canonical vocabulary term.
const ALIASES: &[(&str, &str)] = &[
    ("Golang", "Go"),
    ("NodeJS", "Node.js"),
    ("Node JS", "Node.js"),
    ("ReactJS", "React"),
    ("React.js", "React"),
    ("VueJS", "Vue.js"),
    ("NextJS", "Next.js"),
    ("ExpressJS", "Express"),
    ("Express.js", "Express"),
    ("Postgres", "PostgreSQL"),
    ("Mongo", "MongoDB"),
    ("K8s", "Kubernetes"),
    ("Amazon Web Services", "AWS"),
    ("Google Cloud Platform", "GCP"),
    ("sklearn", "Scikit-learn"),
    ("Tailwind", "Tailwind CSS"),
    ("Rails", "Ruby on Rails"),
    ("ML", "Machine Learning"),
    ("Team Work", "Teamwork"),
];

/// Single-word terms that are too ambiguous in prose to match case-insensitively.
const CASE_SENSITIVE_WORDS: &[&str] = &["Go", "Rust", "Swift", "Dart", "Express", "Excel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Technical,
    Tools,
    Soft,
    Languages,
}

/// A compiled vocabulary term.
pub struct Term {
    pub canonical: &'static str,
    pub category: SkillCategory,
    pattern: Regex,
}

/// A term found in text, with the byte offset of its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    pub canonical: &'static str,
    pub category: SkillCategory,
    pub offset: usize,
}

static TERMS: Lazy<Vec<Term>> = Lazy::new(|| {
    let categories = [
        (SkillCategory::Technical, TECHNICAL_SKILLS),
        (SkillCategory::Tools, TOOLS),
        (SkillCategory::Soft, SOFT_SKILLS),
        (SkillCategory::Languages, SPOKEN_LANGUAGES),
    ];
    let mut terms = Vec::new();
    for (category, words) in categories {
        for &word in words {
            if let Some(pattern) = compile_term(word) {
                terms.push(Term {
                    canonical: word,
                    category,
                    pattern,
                });
            }
        }
    }
    for &(alias, canonical) in ALIASES {
        let Some(category) = category_of(canonical) else {
            continue;
        };
        if let Some(pattern) = compile_term(alias) {
            terms.push(Term {
                canonical,
                category,
                pattern,
            });
        }
    }
    terms
});

fn category_of(canonical: &str) -> Option<SkillCategory> {
    [
        (SkillCategory::Technical, TECHNICAL_SKILLS),
        (SkillCategory::Tools, TOOLS),
        (SkillCategory::Soft, SOFT_SKILLS),
        (SkillCategory::Languages, SPOKEN_LANGUAGES),
    ]
    .into_iter()
    .find(|(_, words)| words.contains(&canonical))
    .map(|(c, _)| c)
}

/// Builds a token-bounded pattern; spaces also match hyphens ("problem-solving").
fn compile_term(term: &str) -> Option<Regex> {
    let body = regex::escape(term).replace(' ', r"[\s\-]+");
    let case_sensitive = is_acronym(term) || CASE_SENSITIVE_WORDS.contains(&term);
    let flags = if case_sensitive { "" } else { "(?i)" };
    Regex::new(&format!(
        r"{flags}(?:^|[^A-Za-z0-9+#])({body})(?:$|[^A-Za-z0-9+#])"
    ))
    .ok()
}

fn is_acronym(term: &str) -> bool {
    term.len() <= 5 && !term.chars().any(|c| c.is_lowercase())
}

/// Finds every vocabulary term present in `text`, ordered by first occurrence.
/// Each canonical term is reported once.
pub fn find_terms(text: &str) -> Vec<TermMatch> {
    let mut found: Vec<TermMatch> = Vec::new();
    for term in TERMS.iter() {
        let Some(offset) = term
            .pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.start())
        else {
            continue;
        };
        match found.iter_mut().find(|m| m.canonical == term.canonical) {
            Some(existing) => existing.offset = existing.offset.min(offset),
            None => found.push(TermMatch {
                canonical: term.canonical,
                category: term.category,
                offset,
            }),
        }
    }
    found.sort_by_key(|m| m.offset);
    found
}

/// Canonical names of the terms of one category found in `text`.
pub fn find_category(text: &str, category: SkillCategory) -> Vec<String> {
    find_terms(text)
        .into_iter()
        .filter(|m| m.category == category)
        .map(|m| m.canonical.to_string())
        .collect()
}

/// Maps a free-form skill label onto its vocabulary term, if it is one.
pub fn lookup(label: &str) -> Option<(&'static str, SkillCategory)> {
    let label = label.trim();
    TERMS
        .iter()
        .find(|t| {
            t.pattern
                .captures(label)
                .and_then(|c| c.get(1))
                .map(|m| m.start() == 0 && m.end() == label.len())
                .unwrap_or(false)
        })
        .map(|t| (t.canonical, t.category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(text: &str) -> Vec<&'static str> {
        find_terms(text).into_iter().map(|m| m.canonical).collect()
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        assert_eq!(canon("Expert in JavaScript"), vec!["JavaScript"]);
        assert_eq!(canon("Java, JavaScript"), vec!["Java", "JavaScript"]);
    }

    #[test]
    fn test_symbols_in_terms() {
        let found = canon("Built services in C++ and C# on .NET with CI/CD");
        assert!(found.contains(&"C++"));
        assert!(found.contains(&"C#"));
        assert!(found.contains(&".NET"));
        assert!(found.contains(&"CI/CD"));
    }

    #[test]
    fn test_acronyms_are_case_sensitive() {
        assert!(canon("took the rest of the week").is_empty());
        assert_eq!(canon("designed REST APIs"), vec!["REST"]);
    }

    #[test]
    fn test_case_insensitive_words() {
        assert_eq!(canon("javascript and python"), vec!["JavaScript", "Python"]);
    }

    #[test]
    fn test_aliases_fold_to_canonical() {
        let found = canon("Golang services on K8s backed by Postgres");
        assert_eq!(found, vec!["Go", "Kubernetes", "PostgreSQL"]);
    }

    #[test]
    fn test_hyphenated_soft_skill() {
        assert_eq!(
            find_category("strong problem-solving skills", SkillCategory::Soft),
            vec!["Problem Solving"]
        );
    }

    #[test]
    fn test_github_does_not_imply_git() {
        assert_eq!(canon("code on GitHub"), vec!["GitHub"]);
    }

    #[test]
    fn test_ordered_by_first_occurrence() {
        assert_eq!(canon("Docker then Python"), vec!["Docker", "Python"]);
    }

    #[test]
    fn test_lookup_exact_label() {
        assert_eq!(lookup("nodejs"), Some(("Node.js", SkillCategory::Technical)));
        assert_eq!(lookup(" Docker "), Some(("Docker", SkillCategory::Tools)));
        assert_eq!(lookup("Docker Compose"), None);
    }
}
