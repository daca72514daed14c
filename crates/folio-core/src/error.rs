//! Error types for the folio-core library.

use thiserror::Error;

use crate::document::DocumentKind;

/// Main error type for the folio library.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Document text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Config(err.to_string())
    }
}

/// Terminal failures of document text extraction.
///
/// Each variant maps to different advice for the person who uploaded the
/// file, so the cause is never collapsed into a generic message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The file is neither a PDF nor a DOCX document.
    #[error("unsupported format: {hint}")]
    UnsupportedFormat { hint: String },

    /// The bytes could not be parsed as the claimed format.
    #[error("corrupted or invalid {kind} file: {reason}")]
    CorruptedDocument { kind: DocumentKind, reason: String },

    /// Parsing succeeded but produced too little text.
    #[error("insufficient text: extracted {found} characters, at least {required} required")]
    InsufficientText { found: usize, required: usize },
}

impl ExtractionError {
    pub(crate) fn corrupted(kind: DocumentKind, reason: impl ToString) -> Self {
        ExtractionError::CorruptedDocument {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Stable machine-readable tag for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedFormat { .. } => "unsupported_format",
            ExtractionError::CorruptedDocument { .. } => "corrupted_document",
            ExtractionError::InsufficientText { .. } => "insufficient_text",
        }
    }

    /// Advice shown to the user alongside the error.
    pub fn remediation(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedFormat { .. } => {
                "Please upload your resume as a PDF or DOCX file."
            }
            ExtractionError::CorruptedDocument { .. } => {
                "The file appears to be damaged. Try exporting it again or upload a different file."
            }
            ExtractionError::InsufficientText { .. } => {
                "The document looks scanned or image-based. Upload a text-based PDF or DOCX instead."
            }
        }
    }
}

/// Result type for the folio library.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = [
            ExtractionError::UnsupportedFormat {
                hint: "notes.txt".to_string(),
            },
            ExtractionError::corrupted(DocumentKind::Pdf, "bad xref"),
            ExtractionError::InsufficientText {
                found: 40,
                required: 100,
            },
        ];

        let kinds: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["unsupported_format", "corrupted_document", "insufficient_text"]
        );

        let advice: std::collections::HashSet<_> = errors.iter().map(|e| e.remediation()).collect();
        assert_eq!(advice.len(), 3);
    }

    #[test]
    fn test_error_messages() {
        let err = ExtractionError::corrupted(DocumentKind::Docx, "missing word/document.xml");
        assert_eq!(
            err.to_string(),
            "corrupted or invalid DOCX file: missing word/document.xml"
        );

        let err = ExtractionError::InsufficientText {
            found: 40,
            required: 100,
        };
        assert!(err.to_string().contains("40 characters"));
    }
}
