//! Configuration structures for extraction, parsing and rendering.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the folio pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Document text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Field parsing configuration.
    pub parsing: ParsingConfig,

    /// Portfolio rendering configuration.
    pub portfolio: PortfolioConfig,
}

static DEFAULT_EXTRACTION: OnceCell<ExtractionConfig> = OnceCell::new();

/// Document text extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum PDF pages to read.
    pub max_pages: usize,

    /// Minimum normalized text length for a document to be accepted.
    pub min_text_length: usize,

    /// Vertical distance (text space units) that starts a new line.
    pub line_break_threshold: f32,

    /// Re-read the PDF with pdf-extract when positioned text looks unusable.
    pub pdf_text_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_pages: 15,
            min_text_length: 100,
            line_break_threshold: 5.0,
            pdf_text_fallback: true,
        }
    }
}

impl ExtractionConfig {
    /// Install the process-wide default used by `DocumentTextExtractor::default()`.
    ///
    /// Only the first call takes effect; returns `false` if a default was
    /// already installed.
    pub fn install_default(self) -> bool {
        DEFAULT_EXTRACTION.set(self).is_ok()
    }

    /// The installed process-wide default, or the built-in values.
    pub fn process_default() -> Self {
        DEFAULT_EXTRACTION.get().cloned().unwrap_or_default()
    }
}

/// Field parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Output caps and scan windows.
    pub limits: ParsingLimits,

    /// Keyword tables used by the heuristics.
    pub vocabulary: Vocabulary,

    /// Run the field parsers on the rayon pool when available.
    pub parallel: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            limits: ParsingLimits::default(),
            vocabulary: Vocabulary::default(),
            parallel: true,
        }
    }
}

/// Output caps and scan windows for the field parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingLimits {
    pub max_experience: usize,
    pub max_projects: usize,
    pub max_technical_skills: usize,
    pub max_soft_skills: usize,

    /// Summary is cut at a word boundary beyond this many characters.
    pub summary_max_chars: usize,

    /// A summary must be longer than this to count as found.
    pub summary_min_chars: usize,

    /// Non-empty lines scanned for a standalone name line.
    pub name_scan_lines: usize,

    /// Non-empty lines scanned by the capitalized-words fallback.
    pub name_fallback_lines: usize,

    /// Non-empty lines treated as the contact header.
    pub header_lines: usize,
}

impl Default for ParsingLimits {
    fn default() -> Self {
        Self {
            max_experience: 5,
            max_projects: 6,
            max_technical_skills: 15,
            max_soft_skills: 10,
            summary_max_chars: 500,
            summary_min_chars: 50,
            name_scan_lines: 10,
            name_fallback_lines: 15,
            header_lines: 15,
        }
    }
}

/// Heading and terminator keywords for one resume section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionVocabulary {
    pub headings: Vec<String>,
    pub terminators: Vec<String>,
}

impl SectionVocabulary {
    fn new(headings: &[&str], terminators: &[&str]) -> Self {
        Self {
            headings: owned(headings),
            terminators: owned(terminators),
        }
    }
}

/// Keyword tables driving the field heuristics.
///
/// All matching is case-insensitive; skill terms are emitted in the spelling
/// given here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub title_keywords: Vec<String>,
    pub name_rejections: Vec<String>,
    pub summary: SectionVocabulary,
    pub experience: SectionVocabulary,
    pub education: SectionVocabulary,
    pub projects: SectionVocabulary,
    pub degree_keywords: Vec<String>,
    pub institution_keywords: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            title_keywords: owned(&[
                "engineer",
                "developer",
                "analyst",
                "manager",
                "designer",
                "consultant",
                "specialist",
                "lead",
                "senior",
                "junior",
                "architect",
                "director",
                "coordinator",
                "administrator",
                "programmer",
                "technician",
                "supervisor",
                "executive",
                "scientist",
                "researcher",
                "associate",
                "intern",
                "trainee",
            ]),
            name_rejections: owned(&["resume", "curriculum", "vitae"]),
            summary: SectionVocabulary::new(
                &["summary", "objective", "profile", "overview", "about", "introduction"],
                &["experience", "education", "skills", "employment"],
            ),
            experience: SectionVocabulary::new(
                &["experience", "employment", "work history"],
                &["education", "skills", "projects"],
            ),
            education: SectionVocabulary::new(
                &["education", "academic"],
                &["experience", "skills", "projects"],
            ),
            projects: SectionVocabulary::new(
                &["project"],
                &[
                    "education",
                    "certification",
                    "achievement",
                    "skills",
                    "experience",
                    "employment",
                    "references",
                    "interests",
                ],
            ),
            degree_keywords: owned(&[
                "bachelor",
                "master",
                "phd",
                "doctorate",
                "diploma",
                "certificate",
                "degree",
            ]),
            institution_keywords: owned(&["university", "college", "institute", "school"]),
            technical_skills: owned(&[
                "JavaScript",
                "TypeScript",
                "Python",
                "Java",
                "C++",
                "C#",
                "Rust",
                "Ruby",
                "PHP",
                "Swift",
                "Kotlin",
                "SQL",
                "HTML",
                "CSS",
                "React",
                "Angular",
                "Vue",
                "Node.js",
                "Express",
                "Django",
                "Flask",
                "Spring",
                "AWS",
                "Azure",
                "GCP",
                "Docker",
                "Kubernetes",
                "PostgreSQL",
                "MySQL",
                "MongoDB",
                "Redis",
                "GraphQL",
                "Git",
                "Jenkins",
                "Terraform",
                "Linux",
                "TensorFlow",
            ]),
            soft_skills: owned(&[
                "Leadership",
                "Communication",
                "Teamwork",
                "Problem Solving",
                "Critical Thinking",
                "Time Management",
                "Project Management",
                "Collaboration",
                "Adaptability",
                "Creativity",
                "Mentoring",
                "Agile",
                "Scrum",
                "Public Speaking",
                "Negotiation",
                "Decision Making",
                "Conflict Resolution",
                "Customer Service",
            ]),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Portfolio rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Template used when none is requested or the id is unknown.
    pub default_template: String,

    /// Year printed in the footer; omitted when unset.
    pub copyright_year: Option<i32>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            default_template: "modern".to_string(),
            copyright_year: None,
        }
    }
}

impl FolioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
