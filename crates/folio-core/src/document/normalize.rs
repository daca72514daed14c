//! Text normalization applied to every extracted document.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HORIZONTAL_RUN: Regex = Regex::new(r"[^\S\n]{3,}").unwrap();
    static ref NEWLINE_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref CAMEL_JOIN: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
}

/// Normalize raw extracted text.
///
/// Line structure is preserved: only horizontal whitespace runs are
/// collapsed, and blank-line runs are capped at one blank line.
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let trimmed_lines = unified
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    let collapsed = HORIZONTAL_RUN.replace_all(&trimmed_lines, " ");
    let collapsed = NEWLINE_RUN.replace_all(&collapsed, "\n\n");
    let split = CAMEL_JOIN.replace_all(&collapsed, "$1 $2");

    split.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_whitespace_runs() {
        assert_eq!(normalize("Jane    Doe\t\t\tEngineer"), "Jane Doe Engineer");
        // Two spaces are left alone.
        assert_eq!(normalize("Jane  Doe"), "Jane  Doe");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(normalize("Summary\n\n\n\n\nText"), "Summary\n\nText");
        assert_eq!(normalize("A\n\nB"), "A\n\nB");
    }

    #[test]
    fn test_line_endings_and_trailing_space() {
        assert_eq!(normalize("Name   \r\nEmail\rPhone  \n"), "Name\nEmail\nPhone");
    }

    #[test]
    fn test_blank_lines_with_spaces_collapse() {
        assert_eq!(normalize("A\n   \n \n\t\nB"), "A\n\nB");
    }

    #[test]
    fn test_camel_case_split() {
        assert_eq!(normalize("ExperienceSenior Engineer"), "Experience Senior Engineer");
        assert_eq!(normalize("JavaScript"), "Java Script");
        assert_eq!(normalize("AWS"), "AWS");
    }

    #[test]
    fn test_idempotent() {
        let raw = "  Jane Doe  \r\n\r\n\r\n\r\nSummary    lineBreak ";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}
