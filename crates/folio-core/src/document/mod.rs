//! Document text extraction for PDF and DOCX resumes.

mod docx;
pub mod normalize;
mod pdf;

pub use docx::DocxExtractor;
pub use normalize::normalize;
pub use pdf::PdfExtractor;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::ExtractionConfig;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the format from a MIME type or file name.
    pub fn detect(hint: &str) -> Result<Self> {
        let hint_lower = hint.trim().to_ascii_lowercase();

        if hint_lower == "application/pdf" || hint_lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if hint_lower == DOCX_MIME || hint_lower.ends_with(".docx") {
            Ok(DocumentKind::Docx)
        } else {
            Err(ExtractionError::UnsupportedFormat {
                hint: hint.to_string(),
            })
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Docx => write!(f, "DOCX"),
        }
    }
}

/// A format-specific text extractor.
pub trait TextExtractor {
    /// The format this extractor reads.
    fn kind(&self) -> DocumentKind;

    /// Extract raw, un-normalized text from the document bytes.
    fn extract_raw(&self, data: &[u8]) -> Result<String>;
}

/// Normalized document text together with its detected format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub kind: DocumentKind,
    pub text: String,
}

/// Dispatches to the PDF or DOCX extractor and enforces the minimum text floor.
#[derive(Debug, Clone)]
pub struct DocumentTextExtractor {
    config: ExtractionConfig,
    pdf: PdfExtractor,
    docx: DocxExtractor,
}

impl DocumentTextExtractor {
    /// Create an extractor with an explicit configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            pdf: PdfExtractor::new(&config),
            docx: DocxExtractor::new(),
            config,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract and normalize text, returning it with the detected format.
    pub fn extract(&self, data: &[u8], hint: &str) -> Result<ExtractedText> {
        let kind = DocumentKind::detect(hint)?;
        let extractor: &dyn TextExtractor = match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Docx => &self.docx,
        };
        debug!("Extracting {} document ({} bytes)", kind, data.len());

        let raw = extractor.extract_raw(data)?;
        let text = normalize(&raw);
        check_text_length(&text, self.config.min_text_length)?;

        info!("Extracted {} characters from {} document", text.chars().count(), kind);
        Ok(ExtractedText { kind, text })
    }

    /// Extract and normalize text.
    pub fn extract_text(&self, data: &[u8], hint: &str) -> Result<String> {
        self.extract(data, hint).map(|extracted| extracted.text)
    }
}

impl Default for DocumentTextExtractor {
    /// Uses the process-wide default installed via [`ExtractionConfig::install_default`].
    fn default() -> Self {
        Self::new(ExtractionConfig::process_default())
    }
}

/// Fail with `InsufficientText` when `text` is shorter than `required` characters.
pub fn check_text_length(text: &str, required: usize) -> Result<()> {
    let found = text.trim().chars().count();
    if found < required {
        return Err(ExtractionError::InsufficientText { found, required });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory PDF and DOCX builders for tests.

    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use std::io::{Cursor, Write};

    /// A text run placed at `(x, y)` on a page.
    pub struct Run<'a> {
        pub x: i64,
        pub y: i64,
        pub text: &'a str,
    }

    pub fn run(x: i64, y: i64, text: &str) -> Run<'_> {
        Run { x, y, text }
    }

    /// Build a PDF where each inner slice is one page of positioned runs.
    pub fn pdf(pages: &[Vec<Run<'_>>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for runs in pages {
            let mut operations = Vec::new();
            for run in runs {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
                operations.push(Operation::new("Td", vec![run.x.into(), run.y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(run.text)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    /// Build a one-page PDF from lines laid out top to bottom.
    pub fn pdf_from_lines(lines: &[&str]) -> Vec<u8> {
        let runs = lines
            .iter()
            .enumerate()
            .map(|(i, line)| run(72, 720 - 14 * i as i64, line))
            .collect();
        pdf(&[runs])
    }

    /// Build a DOCX package whose body is `document_body` (inner `w:body` XML).
    pub fn docx(document_body: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{document_body}</w:body></w:document>"#
        );
        docx_with_entries(&[("word/document.xml", document.as_str())])
    }

    /// Build a DOCX body from plain paragraphs.
    pub fn docx_from_lines(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|line| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escape(line)))
            .collect();
        docx(&body)
    }

    pub fn docx_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#).unwrap();
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
    }
}
