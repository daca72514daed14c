//! Common regex patterns for resume field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    /// North-American grouped digits: `(555) 234-5678`, `+1 555.234.5678`.
    pub static ref PHONE_NORTH_AMERICA: Regex = Regex::new(
        r"(?:\+?1[\s.\-]?)?(?:\(\d{3}\)|\b\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}\b"
    ).unwrap();

    /// International `+CC` runs; digit count is checked by the caller.
    pub static ref PHONE_INTERNATIONAL: Regex = Regex::new(
        r"\+\d[\d\s().\-]{7,22}\d"
    ).unwrap();

    /// `City Name, XX` with a two-letter region code.
    pub static ref LOCATION_REGION: Regex = Regex::new(
        r"\b[A-Z][a-zA-Z]+(?:[ .'\-]+[A-Z][a-zA-Z]+)*,\s*[A-Z]{2}\b"
    ).unwrap();

    /// `City Name, Country Name`.
    pub static ref LOCATION_GENERIC: Regex = Regex::new(
        r"\b[A-Z][a-zA-Z]+(?:[ .'\-]+[A-Z][a-zA-Z]+)*,\s*[A-Z][a-zA-Z]+(?: [A-Z][a-zA-Z]+)*\b"
    ).unwrap();

    pub static ref URL: Regex = Regex::new(
        r"(?i)\b(?:https?://[^\s)>\]]+|www\.[^\s)>\]]+|github\.com/[^\s)>\]]+)"
    ).unwrap();

    // Names
    pub static ref NAME_LINE: Regex = Regex::new(
        r"^[A-Za-z][A-Za-z\s\-'.]*$"
    ).unwrap();

    pub static ref NAME_WORD: Regex = Regex::new(
        r"^[A-Za-z]+(?:['\-][A-Za-z]+)*\.?$"
    ).unwrap();

    /// Two or three capitalized words, optionally with a middle initial.
    pub static ref CAPITALIZED_NAME: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+){1,2}\b"
    ).unwrap();

    // Dates and grades
    pub static ref YEAR_RANGE: Regex = Regex::new(
        r"(?i)\b(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?(?:19|20)\d{2}\s*(?:-|–|—|to)\s*(?:(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+)?(?:19|20)\d{2}|present|current|now)\b"
    ).unwrap();

    pub static ref SINGLE_YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    pub static ref GPA: Regex = Regex::new(
        r"(?i)\bgpa\b\s*:?\s*(\d+(?:\.\d+)?(?:\s*/\s*\d+(?:\.\d+)?)?)"
    ).unwrap();

    pub static ref DEGREE_ABBREVIATION: Regex = Regex::new(
        r"\b(?:B\.?S\.?c?|B\.?A\.?|M\.?S\.?c?|M\.?A\.?|MBA|Ph\.?D\.?|B\.?Eng\.?|M\.?Eng\.?|B\.?Tech|M\.?Tech)(?:\s|$|,)"
    ).unwrap();

    // Projects
    pub static ref TECHNOLOGIES: Regex = Regex::new(
        r"(?i)(?:technologies|tech stack)(?:\s+used)?\s*:?\s*(.+)"
    ).unwrap();

    // Entry separators
    pub static ref SPACED_DASH: Regex = Regex::new(
        r"\s+[-–—]\s+"
    ).unwrap();
}

/// Case-insensitive whole-word alternation over `words`.
pub fn whole_word_pattern<S: AsRef<str>>(words: &[S]) -> Option<Regex> {
    if words.is_empty() {
        return None;
    }
    let alternation = words
        .iter()
        .map(|w| regex::escape(w.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).ok()
}
