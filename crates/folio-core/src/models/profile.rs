//! Structured profile record produced by resume extraction.
//!
//! Every field is always present. Sections the parser could not read carry a
//! fixed placeholder (see [`sentinel`]) instead of being left empty, so
//! consumers only need "is this a real value" checks.

use serde::{Deserialize, Serialize};

/// Placeholder values substituted for fields the parser could not find.
pub mod sentinel {
    pub const NAME: &str = "Name Not Found";
    pub const EMAIL: &str = "Email Not Found";
    pub const PHONE: &str = "Phone Not Found";
    pub const LOCATION: &str = "Location Not Found";
    pub const TITLE: &str = "Title Not Found";
    pub const SUMMARY: &str = "Summary not found. Please update manually.";

    pub const EXPERIENCE_COMPANY: &str = "Experience not found";
    pub const EDUCATION_INSTITUTION: &str = "Education not found";
    pub const PROJECT_NAME: &str = "Projects not found";
    pub const UPDATE_MANUALLY: &str = "Please update manually";
    pub const NOT_AVAILABLE: &str = "N/A";

    pub const TECHNICAL_SKILLS: &str = "Technical skills not found";
    pub const SOFT_SKILLS: &str = "Soft skills not found";

    /// Whether a contact or headline value is one of the placeholders.
    pub fn is_placeholder(value: &str) -> bool {
        matches!(value, NAME | EMAIL | PHONE | LOCATION | TITLE | SUMMARY)
    }
}

/// The canonical structured output of resume extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub projects: Vec<ProjectEntry>,
}

/// Contact and headline information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub summary: String,
}

/// One position from the work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// One degree or course of study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// Technical and soft skill lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

/// A project with its technology stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ExperienceEntry {
    /// Placeholder entry used when no work history was parsed.
    pub fn not_found() -> Self {
        Self {
            company: sentinel::EXPERIENCE_COMPANY.to_string(),
            position: sentinel::UPDATE_MANUALLY.to_string(),
            duration: sentinel::NOT_AVAILABLE.to_string(),
            description: String::new(),
            achievements: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.company == sentinel::EXPERIENCE_COMPANY && self.position == sentinel::UPDATE_MANUALLY
    }
}

impl EducationEntry {
    /// Placeholder entry used when no education was parsed.
    pub fn not_found() -> Self {
        Self {
            institution: sentinel::EDUCATION_INSTITUTION.to_string(),
            degree: sentinel::UPDATE_MANUALLY.to_string(),
            field: sentinel::NOT_AVAILABLE.to_string(),
            duration: sentinel::NOT_AVAILABLE.to_string(),
            gpa: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.institution == sentinel::EDUCATION_INSTITUTION && self.degree == sentinel::UPDATE_MANUALLY
    }
}

impl ProjectEntry {
    /// Placeholder entry used when no projects were parsed.
    pub fn not_found() -> Self {
        Self {
            name: sentinel::PROJECT_NAME.to_string(),
            description: sentinel::UPDATE_MANUALLY.to_string(),
            technologies: Vec::new(),
            link: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == sentinel::PROJECT_NAME && self.description == sentinel::UPDATE_MANUALLY
    }
}

impl Skills {
    /// Technical skills with the placeholder entry removed.
    pub fn real_technical(&self) -> impl Iterator<Item = &str> {
        self.technical
            .iter()
            .map(String::as_str)
            .filter(|s| *s != sentinel::TECHNICAL_SKILLS)
    }

    /// Soft skills with the placeholder entry removed.
    pub fn real_soft(&self) -> impl Iterator<Item = &str> {
        self.soft
            .iter()
            .map(String::as_str)
            .filter(|s| *s != sentinel::SOFT_SKILLS)
    }
}

impl ProfileRecord {
    /// Names of the fields that hold placeholder values.
    ///
    /// Names use the JSON spelling (`personalInfo.email`, `experience`, ...).
    pub fn missing_fields(&self) -> Vec<String> {
        let info = &self.personal_info;
        let mut missing: Vec<String> = [
            ("name", &info.name, sentinel::NAME),
            ("email", &info.email, sentinel::EMAIL),
            ("phone", &info.phone, sentinel::PHONE),
            ("location", &info.location, sentinel::LOCATION),
            ("title", &info.title, sentinel::TITLE),
            ("summary", &info.summary, sentinel::SUMMARY),
        ]
        .into_iter()
        .filter(|(_, value, placeholder)| value.as_str() == *placeholder)
        .map(|(field, _, _)| format!("personalInfo.{field}"))
        .collect();

        if self.experience.iter().all(ExperienceEntry::is_placeholder) {
            missing.push("experience".to_string());
        }
        if self.education.iter().all(EducationEntry::is_placeholder) {
            missing.push("education".to_string());
        }
        if self.skills.real_technical().next().is_none() {
            missing.push("skills.technical".to_string());
        }
        if self.skills.real_soft().next().is_none() {
            missing.push("skills.soft".to_string());
        }
        if self.projects.iter().all(ProjectEntry::is_placeholder) {
            missing.push("projects".to_string());
        }

        missing
    }

    /// Whether the projects list holds only the placeholder entry.
    pub fn has_projects(&self) -> bool {
        !self.projects.iter().all(ProjectEntry::is_placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placeholder_record() -> ProfileRecord {
        ProfileRecord {
            personal_info: PersonalInfo {
                name: sentinel::NAME.to_string(),
                email: "ada@example.com".to_string(),
                phone: sentinel::PHONE.to_string(),
                location: sentinel::LOCATION.to_string(),
                title: "Software Engineer".to_string(),
                summary: sentinel::SUMMARY.to_string(),
            },
            experience: vec![ExperienceEntry::not_found()],
            education: vec![EducationEntry::not_found()],
            skills: Skills {
                technical: vec!["Rust".to_string()],
                soft: vec![sentinel::SOFT_SKILLS.to_string()],
            },
            projects: vec![ProjectEntry::not_found()],
        }
    }

    #[test]
    fn test_missing_fields() {
        let record = placeholder_record();
        assert_eq!(
            record.missing_fields(),
            vec![
                "personalInfo.name",
                "personalInfo.phone",
                "personalInfo.location",
                "personalInfo.summary",
                "experience",
                "education",
                "skills.soft",
                "projects",
            ]
        );
        assert!(!record.has_projects());
    }

    #[test]
    fn test_json_field_names() {
        let record = placeholder_record();
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("personalInfo").is_some());
        assert_eq!(json["education"][0]["field"], "N/A");
        // Absent optionals are omitted rather than written as null.
        assert!(json["education"][0].get("gpa").is_none());
        assert!(json["projects"][0].get("link").is_none());
    }

    #[test]
    fn test_deserialize_without_optional_lists() {
        let json = r#"{
            "personalInfo": {"name": "Ada Lovelace", "email": "ada@example.com",
                "phone": "555-234-5678", "location": "London, UK",
                "title": "Analyst", "summary": "Mathematician."},
            "experience": [{"company": "Analytical Engines", "position": "Analyst",
                "duration": "1842", "description": ""}],
            "education": [],
            "skills": {"technical": [], "soft": []},
            "projects": [{"name": "Notes", "description": "Bernoulli numbers"}]
        }"#;

        let record: ProfileRecord = serde_json::from_str(json).unwrap();
        assert!(record.experience[0].achievements.is_empty());
        assert!(record.projects[0].technologies.is_empty());
        assert_eq!(record.projects[0].link, None);
    }
}
