//! Structured Resume Record: the fixed-shape document every parsing path returns.
//!
//! Every field is always present with a type-correct default so the frontend
//! never has to handle a missing key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub tools: Vec<String>,
    pub languages: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty()
            && self.soft.is_empty()
            && self.tools.is_empty()
            && self.languages.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredResume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Skills,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

impl StructuredResume {
    /// Whether an extraction produced enough to be worth showing.
    ///
    /// Accepts the record when it identifies the person (name or email) or
    /// carries any content section. A record with only a name therefore
    /// passes, which can let a thin AI extraction win over the heuristic layer.
    pub fn has_meaningful_content(&self) -> bool {
        let identified =
            !self.personal_info.full_name.is_empty() || !self.personal_info.email.is_empty();
        let has_content = !self.skills.is_empty()
            || !self.experience.is_empty()
            || !self.education.is_empty()
            || !self.summary.is_empty();
        identified || has_content
    }
}

/// Which layer of the extraction cascade produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsingMethod {
    Ai,
    Heuristic,
    Manual,
}

impl ParsingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsingMethod::Ai => "ai",
            ParsingMethod::Heuristic => "heuristic",
            ParsingMethod::Manual => "manual",
        }
    }
}
