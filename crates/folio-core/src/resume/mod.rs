//! Resume field parsing and profile assembly.

mod assembler;
pub mod rules;

pub use assembler::{ExtractionResult, ProfileAssembler};

use tracing::debug;

use crate::models::{
    EducationEntry, ExperienceEntry, ParsingConfig, ParsingLimits, ProjectEntry, Vocabulary,
};
use rules::{ResumeText, SkillMatcher};

/// Result of a single heuristic extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome<T> {
    Found(T),
    NotFound,
}

impl<T> FieldOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldOutcome::Found(_))
    }

    /// The found value, or `fallback()` for a miss.
    pub fn or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            FieldOutcome::Found(value) => value,
            FieldOutcome::NotFound => fallback(),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            FieldOutcome::Found(value) => Some(value),
            FieldOutcome::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for FieldOutcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldOutcome::Found(value),
            None => FieldOutcome::NotFound,
        }
    }
}

/// Contact and headline outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalFields {
    pub name: FieldOutcome<String>,
    pub email: FieldOutcome<String>,
    pub phone: FieldOutcome<String>,
    pub location: FieldOutcome<String>,
    pub title: FieldOutcome<String>,
    pub summary: FieldOutcome<String>,
}

/// Every extractor's outcome for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub personal: PersonalFields,
    pub experience: FieldOutcome<Vec<ExperienceEntry>>,
    pub education: FieldOutcome<Vec<EducationEntry>>,
    pub technical_skills: FieldOutcome<Vec<String>>,
    pub soft_skills: FieldOutcome<Vec<String>>,
    pub projects: FieldOutcome<Vec<ProjectEntry>>,
}

/// Runs all field extractors over normalized text.
///
/// The extractors share no state, so with the `native` feature they run on
/// the rayon pool; the result is identical either way.
#[derive(Debug, Clone)]
pub struct FieldParser {
    vocabulary: Vocabulary,
    limits: ParsingLimits,
    parallel: bool,
    technical: SkillMatcher,
    soft: SkillMatcher,
}

impl FieldParser {
    /// Create a parser with the built-in vocabulary and limits.
    pub fn new() -> Self {
        Self::from_config(&ParsingConfig::default())
    }

    pub fn from_config(config: &ParsingConfig) -> Self {
        Self {
            technical: SkillMatcher::new(&config.vocabulary.technical_skills),
            soft: SkillMatcher::new(&config.vocabulary.soft_skills),
            vocabulary: config.vocabulary.clone(),
            limits: config.limits.clone(),
            parallel: config.parallel,
        }
    }

    /// Replace the keyword tables.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.technical = SkillMatcher::new(&vocabulary.technical_skills);
        self.soft = SkillMatcher::new(&vocabulary.soft_skills);
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_limits(mut self, limits: ParsingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set whether extractors may run in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn limits(&self) -> &ParsingLimits {
        &self.limits
    }

    /// Run every extractor over `text`.
    pub fn parse(&self, text: &str) -> ParsedFields {
        let text = ResumeText::new(text);
        let parallel = self.parallel && cfg!(feature = "native");
        debug!(parallel, lines = text.lines().len(), "Parsing resume fields");

        #[cfg(feature = "native")]
        if parallel {
            return self.parse_parallel(&text);
        }

        self.parse_sequential(&text)
    }

    fn parse_sequential(&self, text: &ResumeText) -> ParsedFields {
        let personal = self.personal(text);
        let experience = self.experience(text);
        let education = self.education(text);
        let (technical_skills, soft_skills) = self.skills(text);
        let projects = self.projects(text);

        ParsedFields {
            personal,
            experience,
            education,
            technical_skills,
            soft_skills,
            projects,
        }
    }

    #[cfg(feature = "native")]
    fn parse_parallel(&self, text: &ResumeText) -> ParsedFields {
        let ((personal, experience), ((education, (technical_skills, soft_skills)), projects)) =
            rayon::join(
                || rayon::join(|| self.personal(text), || self.experience(text)),
                || {
                    rayon::join(
                        || rayon::join(|| self.education(text), || self.skills(text)),
                        || self.projects(text),
                    )
                },
            );

        ParsedFields {
            personal,
            experience,
            education,
            technical_skills,
            soft_skills,
            projects,
        }
    }

    fn personal(&self, text: &ResumeText) -> PersonalFields {
        PersonalFields {
            name: rules::extract_name(text, &self.vocabulary, &self.limits),
            email: rules::extract_email(text),
            phone: rules::extract_phone(text),
            location: rules::extract_location(text, &self.vocabulary, &self.limits),
            title: rules::extract_title(text, &self.vocabulary),
            summary: rules::extract_summary(text, &self.vocabulary, &self.limits),
        }
    }

    fn experience(&self, text: &ResumeText) -> FieldOutcome<Vec<ExperienceEntry>> {
        rules::extract_experience(text, &self.vocabulary, &self.limits)
    }

    fn education(&self, text: &ResumeText) -> FieldOutcome<Vec<EducationEntry>> {
        rules::extract_education(text, &self.vocabulary)
    }

    fn skills(&self, text: &ResumeText) -> (FieldOutcome<Vec<String>>, FieldOutcome<Vec<String>>) {
        let (technical, soft) = rules::extract_skills(
            text,
            &self.technical,
            &self.soft,
            self.limits.max_technical_skills,
            self.limits.max_soft_skills,
        );
        (non_empty(technical), non_empty(soft))
    }

    fn projects(&self, text: &ResumeText) -> FieldOutcome<Vec<ProjectEntry>> {
        rules::extract_projects(text, &self.vocabulary, &self.limits)
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty<T>(items: Vec<T>) -> FieldOutcome<Vec<T>> {
    if items.is_empty() {
        FieldOutcome::NotFound
    } else {
        FieldOutcome::Found(items)
    }
}

#[cfg(test)]
pub(crate) mod sample {
    /// A complete resume in the shape the extractors expect.
    pub const RESUME: &str = "\
Jane Q. Doe
Senior Backend Engineer
jane.doe@example.com
(555) 234-5678
Portland, OR

PROFESSIONAL SUMMARY
Backend engineer with eight years of experience building payment systems
in Rust and Go, focused on reliability and clear APIs.

WORK EXPERIENCE
Globex Payments | Senior Backend Engineer | 2020 - Present
Led the ledger team through a full platform migration.
• Cut settlement latency by 40% with a streaming pipeline
• Mentored four engineers through their first on-call rotations
Initech | Software Engineer | 2016 - 2020
• Built REST services in Java and PostgreSQL for billing

EDUCATION
Oregon State University | Bachelor of Science in Computer Science | 2012 - 2016
GPA: 3.7/4.0

SKILLS
Technical: Rust, Java, Python, PostgreSQL, Docker, Kubernetes, AWS, Git
Soft: Leadership, Communication, Mentoring, Problem Solving

PROJECTS
Ledger Replayer | Rust, Kafka, PostgreSQL
Replays ledger events to rebuild balances after incidents.
github.com/janedoe/ledger-replayer
";
}
