//! Line-indexed view of normalized resume text and section segmentation.

use crate::models::SectionVocabulary;

use super::patterns::SPACED_DASH;

/// Headings longer than this are treated as prose.
const MAX_HEADING_CHARS: usize = 50;
const MAX_HEADING_WORDS: usize = 5;

const BULLETS: &[char] = &['•', '●', '▪', '◦', '‣', '·', '–', '-', '*', '>'];

/// Normalized resume text split into trimmed lines.
///
/// Blank lines are kept as empty entries so paragraph breaks stay visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText {
    lines: Vec<String>,
}

impl ResumeText {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Non-empty lines in document order.
    pub fn non_empty(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str).filter(|l| !l.is_empty())
    }

    /// The first `count` non-empty lines.
    pub fn header(&self, count: usize) -> impl Iterator<Item = &str> {
        self.non_empty().take(count)
    }

    /// Lines between the first heading of `section` and the next terminator heading.
    pub fn section(&self, section: &SectionVocabulary) -> Option<&[String]> {
        let start = self
            .lines
            .iter()
            .position(|line| is_heading_line(line, &section.headings))?
            + 1;

        let len = self.lines[start..]
            .iter()
            .position(|line| is_heading_line(line, &section.terminators))
            .unwrap_or(self.lines.len() - start);

        Some(&self.lines[start..start + len])
    }
}

/// Remove a leading bullet marker, returning the rest if the line had one.
pub fn strip_bullet(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if !BULLETS.contains(&first) {
        return None;
    }
    let rest = chars.as_str();
    // ASCII markers need a following space so "-5%" or "*args" are not bullets.
    if first.is_ascii() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

pub fn is_bullet(line: &str) -> bool {
    strip_bullet(line).is_some()
}

/// Whether `line` looks like a section heading containing one of `keywords`.
pub fn is_heading_line<S: AsRef<str>>(line: &str, keywords: &[S]) -> bool {
    let line = line.trim();
    if line.is_empty()
        || is_bullet(line)
        || line.chars().count() >= MAX_HEADING_CHARS
        || line.split_whitespace().count() > MAX_HEADING_WORDS
        || line.ends_with('.')
        || line.ends_with(',')
        || line.contains('|')
        || line.contains('@')
    {
        return false;
    }
    contains_heading_word(line, keywords)
}

/// Whole-word keyword test, allowing a plural `s` on the last word.
///
/// `Projects` matches `project`; `Experienced` does not match `experience`.
fn contains_heading_word<S: AsRef<str>>(line: &str, keywords: &[S]) -> bool {
    let words: Vec<String> = line
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    keywords.iter().any(|keyword| {
        let wanted: Vec<String> = keyword
            .as_ref()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let Some((last, leading)) = wanted.split_last() else {
            return false;
        };
        words.windows(wanted.len()).any(|window| {
            let (tail, head) = (&window[wanted.len() - 1], &window[..wanted.len() - 1]);
            head == leading && (tail == last || tail.strip_suffix('s') == Some(last.as_str()))
        })
    })
}

/// Case-insensitive substring test.
pub fn contains_any<S: AsRef<str>>(line: &str, keywords: &[S]) -> bool {
    let lower = line.to_lowercase();
    keywords
        .iter()
        .any(|k| lower.contains(&k.as_ref().to_lowercase()))
}

/// Split an entry line on `|`, falling back to spaced dashes.
pub fn split_entry(line: &str) -> Vec<String> {
    let parts: Vec<&str> = if line.contains('|') {
        line.split('|').collect()
    } else {
        SPACED_DASH.split(line).collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn has_entry_delimiter(line: &str) -> bool {
    line.contains('|') || SPACED_DASH.is_match(line)
}

pub fn looks_like_url(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("http") || lower.contains("www.") || lower.contains(".com")
}
