//! Core library for resume extraction and portfolio generation.
//!
//! This crate provides:
//! - Document text extraction from PDF and DOCX files
//! - Heuristic resume field parsing into a [`ProfileRecord`]
//! - Static HTML/CSS portfolio rendering from built-in templates

pub mod document;
pub mod error;
pub mod models;
pub mod portfolio;
pub mod resume;

pub use document::{DocumentKind, DocumentTextExtractor, ExtractedText, TextExtractor};
pub use error::{ExtractionError, FolioError, Result};
pub use models::{ExtractionConfig, FolioConfig, ProfileRecord};
pub use portfolio::{PortfolioRenderer, PortfolioSite, TemplateCatalog, TemplateConfig};
pub use resume::{ExtractionResult, FieldOutcome, FieldParser, ParsedFields, ProfileAssembler};
