//! DOCX text extraction from `word/document.xml`.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use tracing::debug;

use super::{DocumentKind, Result, TextExtractor};
use crate::error::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX extractor. Paragraphs become lines in document order.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(&self, data: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(corrupted)?;
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            ExtractionError::corrupted(DocumentKind::Docx, format!("{DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(corrupted)?;
        Ok(xml)
    }
}

impl TextExtractor for DocxExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn extract_raw(&self, data: &[u8]) -> Result<String> {
        let xml = self.read_document_part(data)?;
        let lines = paragraph_lines(&xml)?;
        debug!("DOCX document has {} paragraphs", lines.len());
        Ok(lines.join("\n"))
    }
}

fn corrupted(err: impl ToString) -> ExtractionError {
    ExtractionError::corrupted(DocumentKind::Docx, err)
}

/// Walk the WordprocessingML body and return one string per `w:p`.
fn paragraph_lines(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(corrupted)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    lines.push(std::mem::take(&mut current));
                    in_paragraph = false;
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => lines.push(String::new()),
                // Outside a run, `w:tab` is a tab-stop definition in `w:pPr/w:tabs`.
                b"w:tab" if in_paragraph && in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph && in_run => current.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_paragraph && in_text => {
                current.push_str(&e.unescape().map_err(corrupted)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{docx, docx_with_entries};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraphs_become_lines() {
        let data = docx(concat!(
            "<w:p><w:r><w:t>Jane </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>Doe</w:t></w:r></w:p>",
            "<w:p/>",
            "<w:p><w:r><w:t>Skills</w:t></w:r></w:p>",
        ));

        let text = DocxExtractor::new().extract_raw(&data).unwrap();
        assert_eq!(text, "Jane Doe\n\nSkills");
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let data = docx(concat!(
            "<w:p><w:r><w:t>Acme</w:t><w:tab/><w:t>2019</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>R&amp;D Lead</w:t><w:br/><w:t>Line two</w:t></w:r></w:p>",
        ));

        let text = DocxExtractor::new().extract_raw(&data).unwrap();
        assert_eq!(text, "Acme\t2019\nR&D Lead\nLine two");
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let data = docx(concat!(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"right\" w:pos=\"9360\"/><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>",
            "<w:r><w:t>Globex Payments</w:t><w:tab/><w:t>2020 - Present</w:t></w:r></w:p>",
        ));

        let text = DocxExtractor::new().extract_raw(&data).unwrap();
        assert_eq!(text, "Globex Payments\t2020 - Present");
    }

    #[test]
    fn test_instruction_text_is_ignored() {
        let data = docx(
            "<w:p><w:r><w:instrText>HYPERLINK \"x\"</w:instrText><w:t>Portfolio</w:t></w:r></w:p>",
        );

        let text = DocxExtractor::new().extract_raw(&data).unwrap();
        assert_eq!(text, "Portfolio");
    }

    #[test]
    fn test_missing_document_part() {
        let data = docx_with_entries(&[("word/styles.xml", "<w:styles/>")]);
        let err = DocxExtractor::new().extract_raw(&data).unwrap_err();

        assert!(matches!(
            err,
            ExtractionError::CorruptedDocument {
                kind: DocumentKind::Docx,
                ..
            }
        ));
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_malformed_xml() {
        let data = docx_with_entries(&[(
            "word/document.xml",
            "<w:document><w:body><w:p><w:t>Jane</w:p></w:body>",
        )]);
        let err = DocxExtractor::new().extract_raw(&data).unwrap_err();
        assert_eq!(err.kind(), "corrupted_document");
    }
}
