//! Builds a [`ProfileRecord`] from document bytes or extracted text.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::{FieldOutcome, FieldParser, ParsedFields};
use crate::document::{self, DocumentKind, DocumentTextExtractor, normalize};
use crate::error::ExtractionError;
use crate::models::{
    EducationEntry, ExperienceEntry, FolioConfig, PersonalInfo, ProfileRecord, ProjectEntry,
    Skills, sentinel,
};

/// Result of profile extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted profile.
    pub record: ProfileRecord,
    /// Normalized document text the fields were parsed from.
    pub raw_text: String,
    /// Detected input format.
    pub document_kind: DocumentKind,
    /// Fields that received placeholder values.
    pub missing_fields: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// End-to-end resume extraction: document text, field parsing, assembly.
///
/// Extraction failures abort with [`ExtractionError`]. Field misses never do;
/// they are filled with the placeholders from [`sentinel`].
#[derive(Debug, Clone)]
pub struct ProfileAssembler {
    extractor: DocumentTextExtractor,
    parser: FieldParser,
}

impl ProfileAssembler {
    /// Create an assembler from a full configuration.
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            extractor: DocumentTextExtractor::new(config.extraction.clone()),
            parser: FieldParser::from_config(&config.parsing),
        }
    }

    pub fn with_extractor(mut self, extractor: DocumentTextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_parser(mut self, parser: FieldParser) -> Self {
        self.parser = parser;
        self
    }

    /// Extract a profile from document bytes.
    ///
    /// `hint` is a MIME type or file name used to pick the document format.
    pub fn extract(&self, data: &[u8], hint: &str) -> Result<ExtractionResult, ExtractionError> {
        let start = Instant::now();

        let extracted = self.extractor.extract(data, hint)?;
        let record = self.assemble_text(&extracted.text)?;
        let missing_fields = record.missing_fields();

        info!(
            "Assembled profile from {} document with {} missing fields",
            extracted.kind,
            missing_fields.len()
        );

        Ok(ExtractionResult {
            record,
            raw_text: extracted.text,
            document_kind: extracted.kind,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Extract only the profile record from document bytes.
    pub fn extract_profile(&self, data: &[u8], hint: &str) -> Result<ProfileRecord, ExtractionError> {
        self.extract(data, hint).map(|result| result.record)
    }

    /// Parse and assemble already-extracted text.
    ///
    /// The text is normalized again and held to the same minimum length as
    /// document extraction.
    pub fn assemble_text(&self, text: &str) -> Result<ProfileRecord, ExtractionError> {
        let text = normalize(text);
        document::check_text_length(&text, self.extractor.config().min_text_length)?;

        let fields = self.parser.parse(&text);
        Ok(assemble(fields))
    }
}

impl Default for ProfileAssembler {
    fn default() -> Self {
        Self {
            extractor: DocumentTextExtractor::default(),
            parser: FieldParser::default(),
        }
    }
}

/// Substitute placeholders for every field the parser missed.
pub fn assemble(fields: ParsedFields) -> ProfileRecord {
    let personal = fields.personal;
    let personal_info = PersonalInfo {
        name: or_sentinel(personal.name, "name", sentinel::NAME),
        email: or_sentinel(personal.email, "email", sentinel::EMAIL),
        phone: or_sentinel(personal.phone, "phone", sentinel::PHONE),
        location: or_sentinel(personal.location, "location", sentinel::LOCATION),
        title: or_sentinel(personal.title, "title", sentinel::TITLE),
        summary: or_sentinel(personal.summary, "summary", sentinel::SUMMARY),
    };

    ProfileRecord {
        personal_info,
        experience: fields
            .experience
            .or_else(|| vec![ExperienceEntry::not_found()]),
        education: fields
            .education
            .or_else(|| vec![EducationEntry::not_found()]),
        skills: Skills {
            technical: fields
                .technical_skills
                .or_else(|| vec![sentinel::TECHNICAL_SKILLS.to_string()]),
            soft: fields
                .soft_skills
                .or_else(|| vec![sentinel::SOFT_SKILLS.to_string()]),
        },
        projects: fields.projects.or_else(|| vec![ProjectEntry::not_found()]),
    }
}

fn or_sentinel(outcome: FieldOutcome<String>, field: &str, placeholder: &str) -> String {
    if !outcome.is_found() {
        debug!("No {} found, using placeholder", field);
    }
    outcome.or_else(|| placeholder.to_string())
}
