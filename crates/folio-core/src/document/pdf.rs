//! PDF text extraction from positioned content-stream fragments.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

use super::{DocumentKind, Result, TextExtractor};
use crate::error::ExtractionError;
use crate::models::ExtractionConfig;

/// TJ adjustments at or below this value (thousandths of an em) read as a word gap.
const TJ_WORD_GAP: f32 = -250.0;

/// Share of unprintable characters above which positioned text is considered unusable.
const MAX_UNPRINTABLE_RATIO: f32 = 0.10;

/// Whole-document text decoder used when the positioned pass is unusable.
type FallbackDecoder = fn(&[u8]) -> Option<String>;

/// PDF extractor that rebuilds reading order from text positions.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    max_pages: usize,
    line_break_threshold: f32,
    min_text_length: usize,
    text_fallback: bool,
    fallback_decoder: FallbackDecoder,
}

/// A run of text and where it was drawn.
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    x: f32,
    y: f32,
    text: String,
}

/// Text state tracked while walking a content stream.
struct TextState {
    /// Text matrix `[a b c d e f]`.
    matrix: [f32; 6],
    /// Text line matrix, reset by every positioning operator.
    line_matrix: [f32; 6],
    leading: f32,
}

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

impl TextState {
    fn new() -> Self {
        Self {
            matrix: IDENTITY,
            line_matrix: IDENTITY,
            leading: 0.0,
        }
    }

    fn begin(&mut self) {
        self.matrix = IDENTITY;
        self.line_matrix = IDENTITY;
    }

    fn set_matrix(&mut self, m: [f32; 6]) {
        self.matrix = m;
        self.line_matrix = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line_matrix;
        self.set_matrix([a, b, c, d, tx * a + ty * c + e, tx * b + ty * d + f]);
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.matrix[4], self.matrix[5])
    }
}

impl PdfExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            line_break_threshold: config.line_break_threshold,
            min_text_length: config.min_text_length,
            text_fallback: config.pdf_text_fallback,
            fallback_decoder: decode_with_pdf_extract,
        }
    }

    #[cfg(test)]
    fn with_fallback_decoder(mut self, decoder: FallbackDecoder) -> Self {
        self.fallback_decoder = decoder;
        self
    }

    /// Parse the document, decrypting it with the empty password if needed.
    ///
    /// Returns the document and the bytes the fallback decoder should read.
    fn load(&self, data: &[u8]) -> Result<(Document, Vec<u8>)> {
        let mut doc =
            Document::load_mem(data).map_err(|e| ExtractionError::corrupted(DocumentKind::Pdf, e))?;

        let bytes = if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                ExtractionError::corrupted(DocumentKind::Pdf, format!("encrypted document: {e}"))
            })?;
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| ExtractionError::corrupted(DocumentKind::Pdf, e))?;
            decrypted
        } else {
            data.to_vec()
        };

        Ok((doc, bytes))
    }

    /// Text of every page (up to `max_pages`) joined by blank lines.
    fn positioned_text(&self, doc: &Document) -> String {
        let pages = doc.get_pages();
        if pages.len() > self.max_pages {
            debug!("PDF has {} pages, reading the first {}", pages.len(), self.max_pages);
        }

        let mut page_texts = Vec::new();
        for (number, page_id) in pages.into_iter().take(self.max_pages) {
            let fragments = match page_fragments(doc, page_id) {
                Ok(fragments) => fragments,
                Err(e) => {
                    warn!("Skipping unreadable content on page {}: {}", number, e);
                    continue;
                }
            };
            trace!("Page {}: {} text fragments", number, fragments.len());

            let text = self.layout(fragments);
            if !text.trim().is_empty() {
                page_texts.push(text);
            }
        }

        page_texts.join("\n\n")
    }

    /// Sort fragments into reading order and join them into lines.
    fn layout(&self, mut fragments: Vec<Fragment>) -> String {
        fragments.sort_by(|a, b| b.y.total_cmp(&a.y));

        let mut lines: Vec<Vec<Fragment>> = Vec::new();
        for fragment in fragments {
            match lines.last_mut() {
                Some(line) if (line[0].y - fragment.y).abs() <= self.line_break_threshold => {
                    line.push(fragment)
                }
                _ => lines.push(vec![fragment]),
            }
        }

        lines
            .into_iter()
            .map(|mut line| {
                line.sort_by(|a, b| a.x.total_cmp(&b.x));
                join_fragments(&line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn is_usable(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_text_length
            && unprintable_ratio(text) <= MAX_UNPRINTABLE_RATIO
    }
}

impl TextExtractor for PdfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn extract_raw(&self, data: &[u8]) -> Result<String> {
        let (doc, bytes) = self.load(data)?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(ExtractionError::corrupted(DocumentKind::Pdf, "document has no pages"));
        }
        debug!("Loaded PDF with {} pages", page_count);

        let text = self.positioned_text(&doc);
        if self.is_usable(&text) || !self.text_fallback {
            return Ok(text);
        }

        debug!("Positioned text unusable ({} chars), trying pdf-extract", text.len());
        match (self.fallback_decoder)(&bytes) {
            Some(fallback) if printable_count(&fallback) > printable_count(&text) => Ok(fallback),
            _ => Ok(text),
        }
    }
}

fn decode_with_pdf_extract(data: &[u8]) -> Option<String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(data)));
    match result {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            warn!("pdf-extract failed: {}", e);
            None
        }
        Err(_) => {
            warn!("pdf-extract panicked on malformed document");
            None
        }
    }
}

/// Collect positioned text fragments from one page's content stream.
fn page_fragments(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<Fragment>> {
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut state = TextState::new();
    let mut fragments = Vec::new();

    for operation in &content.operations {
        let operands = &operation.operands;
        match operation.operator.as_str() {
            "BT" => state.begin(),
            "Tm" => {
                if let Some(m) = matrix_operand(operands) {
                    state.set_matrix(m);
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    state.translate(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number_at(operands, 0), number_at(operands, 1)) {
                    state.leading = -ty;
                    state.translate(tx, ty);
                }
            }
            "TL" => {
                if let Some(leading) = number_at(operands, 0) {
                    state.leading = leading;
                }
            }
            "T*" => state.next_line(),
            "Tj" => push_fragment(&mut fragments, &state, shown_text(operation, 0)),
            "'" => {
                state.next_line();
                push_fragment(&mut fragments, &state, shown_text(operation, 0));
            }
            "\"" => {
                state.next_line();
                push_fragment(&mut fragments, &state, shown_text(operation, 2));
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    push_fragment(&mut fragments, &state, Some(array_text(items)));
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

fn push_fragment(fragments: &mut Vec<Fragment>, state: &TextState, text: Option<String>) {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        let (x, y) = state.position();
        fragments.push(Fragment { x, y, text });
    }
}

fn shown_text(operation: &Operation, index: usize) -> Option<String> {
    match operation.operands.get(index) {
        Some(Object::String(bytes, _)) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

fn array_text(items: &[Object]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
            other => {
                if let Some(adjust) = number(other) {
                    if adjust <= TJ_WORD_GAP && !text.ends_with(' ') {
                        text.push(' ');
                    }
                }
            }
        }
    }
    text
}

/// Decode a PDF string: UTF-16BE when it carries a byte-order mark, else one char per byte.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn number_at(operands: &[Object], index: usize) -> Option<f32> {
    operands.get(index).and_then(number)
}

fn matrix_operand(operands: &[Object]) -> Option<[f32; 6]> {
    let mut m = [0.0; 6];
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = number_at(operands, i)?;
    }
    Some(m)
}

fn join_fragments(line: &[Fragment]) -> String {
    let mut text = String::new();
    for fragment in line {
        let piece = fragment.text.as_str();
        if !text.is_empty() && !text.ends_with(char::is_whitespace) && !piece.starts_with(char::is_whitespace) {
            text.push(' ');
        }
        text.push_str(piece);
    }
    text
}

fn is_unprintable(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\t' && c != '\r')
        || c == char::REPLACEMENT_CHARACTER
        || ('\u{E000}'..='\u{F8FF}').contains(&c)
}

fn unprintable_ratio(text: &str) -> f32 {
    let total = text.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return 0.0;
    }
    let bad = text.chars().filter(|&c| is_unprintable(c)).count();
    bad as f32 / total as f32
}

fn printable_count(text: &str) -> usize {
    text.chars()
        .filter(|&c| !c.is_whitespace() && !is_unprintable(c))
        .count()
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{pdf, pdf_from_lines, run};
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> PdfExtractor {
        PdfExtractor::new(&ExtractionConfig {
            min_text_length: 0,
            ..ExtractionConfig::default()
        })
    }

    #[test]
    fn test_reading_order_from_positions() {
        // Runs are written bottom-up and right-to-left.
        let data = pdf(&[vec![
            run(300, 690, "Portland, OR"),
            run(72, 690, "(555) 234-5678"),
            run(72, 705, "jane.doe@example.com"),
            run(72, 720, "Jane Q. Doe"),
        ]]);

        let text = extractor().extract_raw(&data).unwrap();
        assert_eq!(
            text,
            "Jane Q. Doe\njane.doe@example.com\n(555) 234-5678 Portland, OR"
        );
    }

    #[test]
    fn test_small_vertical_jitter_stays_on_one_line() {
        let data = pdf(&[vec![
            run(200, 702, "Engineer"),
            run(72, 700, "Senior"),
        ]]);

        let text = extractor().extract_raw(&data).unwrap();
        assert_eq!(text, "Senior Engineer");
    }

    #[test]
    fn test_pages_are_separated_by_blank_line() {
        let data = pdf(&[
            vec![run(72, 720, "First page")],
            vec![run(72, 720, "Second page")],
        ]);

        let text = extractor().extract_raw(&data).unwrap();
        assert_eq!(text, "First page\n\nSecond page");
    }

    #[test]
    fn test_page_cap() {
        let pages: Vec<_> = (0..4)
            .map(|_| vec![run(72, 720, "Page text")])
            .collect();
        let data = pdf(&pages);

        let extractor = PdfExtractor::new(&ExtractionConfig {
            max_pages: 2,
            min_text_length: 0,
            ..ExtractionConfig::default()
        });
        let text = extractor.extract_raw(&data).unwrap();
        assert_eq!(text.matches("Page text").count(), 2);
    }

    #[test]
    fn test_corrupted_pdf() {
        let err = extractor().extract_raw(b"%PDF-1.5 garbage").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::CorruptedDocument {
                kind: DocumentKind::Pdf,
                ..
            }
        ));
    }

    #[test]
    fn test_tj_array_kerning() {
        let items = vec![
            Object::string_literal("Data"),
            Object::Integer(-300),
            Object::string_literal("Engineer"),
            Object::Integer(-50),
            Object::string_literal("ing"),
        ];
        assert_eq!(array_text(&items), "Data Engineering");
    }

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x4A, 0x00, 0xF6, 0x00, 0x72, 0x00, 0x67];
        assert_eq!(decode_pdf_string(&bytes), "Jörg");
        assert_eq!(decode_pdf_string(b"Plain"), "Plain");
    }

    #[test]
    fn test_text_state_operators() {
        let mut state = TextState::new();
        state.set_matrix([1.0, 0.0, 0.0, 1.0, 50.0, 700.0]);
        state.leading = 14.0;
        state.next_line();
        assert_eq!(state.position(), (50.0, 686.0));

        state.translate(10.0, -20.0);
        assert_eq!(state.position(), (60.0, 666.0));
    }

    #[test]
    fn test_unprintable_ratio() {
        assert_eq!(unprintable_ratio("plain text"), 0.0);
        assert!(unprintable_ratio("\u{1}\u{2}\u{3}ab") > MAX_UNPRINTABLE_RATIO);
    }

    #[test]
    fn test_noisy_text_is_not_usable() {
        let extractor = PdfExtractor::new(&ExtractionConfig::default());
        let noisy: String = std::iter::repeat("\u{3}\u{11}a").take(60).collect();
        assert!(!extractor.is_usable(&noisy));

        let data = pdf_from_lines(&["x".repeat(120).as_str()]);
        assert!(extractor.extract_raw(&data).unwrap().len() >= 120);
    }

    const DECODED: &str = "Jane Q. Doe\nSenior Backend Engineer\njane.doe@example.com\n\
        Eight years building payment systems, settlement pipelines and ledgers.";

    fn with_fallback(enabled: bool) -> PdfExtractor {
        PdfExtractor::new(&ExtractionConfig {
            pdf_text_fallback: enabled,
            ..ExtractionConfig::default()
        })
    }

    fn glyph_id_pdf() -> Vec<u8> {
        let garbled: String = std::iter::repeat("\u{3}\u{11}a").take(60).collect();
        pdf_from_lines(&[garbled.as_str()])
    }

    #[test]
    fn test_fallback_replaces_garbled_text() {
        let extractor = with_fallback(true).with_fallback_decoder(|_| Some(DECODED.to_string()));
        assert_eq!(extractor.extract_raw(&glyph_id_pdf()).unwrap(), DECODED);
    }

    #[test]
    fn test_fallback_disabled_keeps_positioned_text() {
        let extractor = with_fallback(false)
            .with_fallback_decoder(|_| panic!("fallback decoder must not run when disabled"));
        let text = extractor.extract_raw(&glyph_id_pdf()).unwrap();
        assert!(text.contains('\u{3}'));
        assert_eq!(text.chars().count(), 180);

        let short = extractor.extract_raw(&pdf_from_lines(&["Jane Doe"])).unwrap();
        assert_eq!(short, "Jane Doe");
    }

    #[test]
    fn test_worse_fallback_is_ignored() {
        let data = pdf_from_lines(&["Jane Doe"]);

        let extractor = with_fallback(true).with_fallback_decoder(|_| Some("\u{FFFD}\u{FFFD} \u{E001}".to_string()));
        assert_eq!(extractor.extract_raw(&data).unwrap(), "Jane Doe");

        let extractor = with_fallback(true).with_fallback_decoder(|_| None);
        assert_eq!(extractor.extract_raw(&data).unwrap(), "Jane Doe");
    }

    #[test]
    fn test_usable_text_skips_fallback() {
        let line = "Backend engineer with eight years of experience building payment systems and settlement ledgers in Rust and Go.";
        let data = pdf_from_lines(&["Jane Q. Doe", line]);
        let extractor = with_fallback(true)
            .with_fallback_decoder(|_| panic!("fallback decoder must not run for usable text"));
        assert_eq!(
            extractor.extract_raw(&data).unwrap(),
            format!("Jane Q. Doe\n{line}")
        );
    }

    #[test]
    fn test_pdf_extract_fallback_on_short_document() {
        let text = with_fallback(true).extract_raw(&pdf_from_lines(&["Jane Doe"])).unwrap();
        assert!(text.contains("Jane"));
    }
}
