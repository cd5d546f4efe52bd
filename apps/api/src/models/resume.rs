use serde::{Deserialize, Serialize};

/// The resume document served by this process. Loaded once at startup and
/// shared read-only for the lifetime of the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub profile: Profile,
    pub contact: Contact,
    /// Ordered most recent first.
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<EducationEntry>,
    pub languages_spoken: Vec<String>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub web: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub focus: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: Vec<String>,
}

impl ExperienceEntry {
    /// `"{role} at {company} ({start} – {end})"`
    pub fn headline(&self) -> String {
        format!(
            "{} at {} ({} – {})",
            self.role, self.company, self.start, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_document;

    #[test]
    fn test_languages_spoken_uses_camel_case_key() {
        let value = serde_json::to_value(sample_document()).unwrap();
        assert!(value.get("languagesSpoken").is_some());
        assert!(value.get("languages_spoken").is_none());
    }

    #[test]
    fn test_missing_highlights_default_to_empty() {
        let entry: ExperienceEntry = serde_json::from_str(
            r#"{"company":"Acme","role":"Engineer","start":"2020","end":"2021"}"#,
        )
        .unwrap();
        assert!(entry.highlights.is_empty());
    }

    #[test]
    fn test_headline_format() {
        let doc = sample_document();
        assert_eq!(
            doc.experience[0].headline(),
            "Senior Backend Engineer at Northwind Systems (2022 – Present)"
        );
    }
}
