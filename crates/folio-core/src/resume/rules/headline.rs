//! Name, title and summary extraction.

use regex::Regex;

use super::lines::{ResumeText, contains_any, is_bullet, is_heading_line, looks_like_url};
use super::patterns::{CAPITALIZED_NAME, NAME_LINE, NAME_WORD, whole_word_pattern};
use crate::models::{ParsingLimits, Vocabulary};
use crate::resume::FieldOutcome;

const MAX_TITLE_CHARS: usize = 80;

/// Headings that never belong to a name line.
const OTHER_HEADINGS: &[&str] = &["skills", "contact", "references", "interests", "certifications"];

/// Every heading keyword the vocabulary knows, for rejecting heading lines.
fn all_headings(vocabulary: &Vocabulary) -> Vec<String> {
    vocabulary
        .summary
        .headings
        .iter()
        .chain(&vocabulary.experience.headings)
        .chain(&vocabulary.education.headings)
        .chain(&vocabulary.projects.headings)
        .cloned()
        .chain(OTHER_HEADINGS.iter().map(|h| h.to_string()))
        .collect()
}

/// Shared rejection rules for candidate name lines.
fn rejects_as_name(
    line: &str,
    vocabulary: &Vocabulary,
    titles: Option<&Regex>,
    headings: &[String],
) -> bool {
    contains_any(line, &vocabulary.name_rejections)
        || line.contains('@')
        || line.contains('(')
        || looks_like_url(line)
        || line.starts_with(|c: char| c.is_ascii_digit())
        || is_heading_line(line, headings)
        || titles.is_some_and(|re| re.is_match(line))
}

/// The candidate's name from the top of the document.
pub fn extract_name(
    text: &ResumeText,
    vocabulary: &Vocabulary,
    limits: &ParsingLimits,
) -> FieldOutcome<String> {
    let titles = whole_word_pattern(&vocabulary.title_keywords);
    let headings = all_headings(vocabulary);

    let standalone = text.header(limits.name_scan_lines).find(|line| {
        let len = line.chars().count();
        (3..=50).contains(&len)
            && !rejects_as_name(line, vocabulary, titles.as_ref(), &headings)
            && is_name_line(line)
    });
    if let Some(line) = standalone {
        return FieldOutcome::Found(title_case(line));
    }

    text.header(limits.name_fallback_lines)
        .filter(|line| !rejects_as_name(line, vocabulary, titles.as_ref(), &headings))
        .find_map(|line| CAPITALIZED_NAME.find(line))
        .map(|m| m.as_str().to_string())
        .into()
}

fn is_name_line(line: &str) -> bool {
    if !NAME_LINE.is_match(line) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            let len = w.chars().count();
            (2..=20).contains(&len) && NAME_WORD.is_match(w)
        })
}

/// Title-case all-upper or all-lower words; mixed-case words are kept.
fn title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|word| {
            let letters = word.chars().filter(|c| c.is_alphabetic());
            let all_upper = letters.clone().all(char::is_uppercase);
            let all_lower = letters.clone().all(char::is_lowercase);
            if !(all_upper || all_lower) {
                return word.to_string();
            }

            let mut out = String::with_capacity(word.len());
            let mut capitalize = true;
            for c in word.chars() {
                if capitalize && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    capitalize = false;
                } else {
                    out.extend(c.to_lowercase());
                }
                if c == '-' || c == '\'' {
                    capitalize = true;
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first short line naming a role.
pub fn extract_title(text: &ResumeText, vocabulary: &Vocabulary) -> FieldOutcome<String> {
    let Some(titles) = whole_word_pattern(&vocabulary.title_keywords) else {
        return FieldOutcome::NotFound;
    };

    text.non_empty()
        .find(|line| {
            line.chars().count() < MAX_TITLE_CHARS
                && !line.contains('@')
                && !line.contains('(')
                && !line.contains('|')
                && !looks_like_url(line)
                && !is_bullet(line)
                && titles.is_match(line)
        })
        .map(str::to_string)
        .into()
}

/// The paragraph under a summary heading.
pub fn extract_summary(
    text: &ResumeText,
    vocabulary: &Vocabulary,
    limits: &ParsingLimits,
) -> FieldOutcome<String> {
    let lines = text.lines();
    let Some(heading) = lines
        .iter()
        .position(|line| is_heading_line(line, &vocabulary.summary.headings))
    else {
        return FieldOutcome::NotFound;
    };

    let mut parts: Vec<&str> = Vec::new();
    for line in &lines[heading + 1..] {
        if line.is_empty() {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        if is_heading_line(line, &vocabulary.summary.terminators) {
            break;
        }
        parts.push(line);
    }

    let summary = truncate_at_word(&parts.join(" "), limits.summary_max_chars);
    if summary.chars().count() > limits.summary_min_chars {
        FieldOutcome::Found(summary)
    } else {
        FieldOutcome::NotFound
    }
}

/// Cut `text` to at most `max` chars, backing up to the last word boundary.
fn truncate_at_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    match cut.rfind(char::is_whitespace) {
        Some(pos) => cut[..pos].trim_end().to_string(),
        None => cut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(text: &str) -> FieldOutcome<String> {
        extract_name(
            &ResumeText::new(text),
            &Vocabulary::default(),
            &ParsingLimits::default(),
        )
    }

    fn summary(text: &str) -> FieldOutcome<String> {
        extract_summary(
            &ResumeText::new(text),
            &Vocabulary::default(),
            &ParsingLimits::default(),
        )
    }

    #[test]
    fn test_name_with_initial() {
        assert_eq!(
            name("Jane Q. Doe\njane.doe@example.com\n(555) 234-5678"),
            FieldOutcome::Found("Jane Q. Doe".to_string())
        );
    }

    #[test]
    fn test_name_skips_resume_banner_and_title() {
        assert_eq!(
            name("Curriculum Vitae\nSenior Software Engineer\nALEX JOHNSON\nalex@example.com"),
            FieldOutcome::Found("Alex Johnson".to_string())
        );
    }

    #[test]
    fn test_name_keeps_mixed_case() {
        assert_eq!(
            name("ronan McDonald\nDublin, Ireland"),
            FieldOutcome::Found("Ronan McDonald".to_string())
        );
        assert_eq!(
            name("MARY-JANE O'BRIEN"),
            FieldOutcome::Found("Mary-Jane O'Brien".to_string())
        );
    }

    #[test]
    fn test_name_fallback_to_capitalized_words() {
        // The standalone rule rejects the line because of the digits.
        assert_eq!(
            name("Prepared for: Grace Hopper 2024"),
            FieldOutcome::Found("Grace Hopper".to_string())
        );
    }

    #[test]
    fn test_name_not_found() {
        assert_eq!(name("jane@example.com\n555-234-5678\nx"), FieldOutcome::NotFound);
    }

    #[test]
    fn test_title() {
        let text = ResumeText::new(
            "Jane Doe\njane@example.com | Senior Engineer\nStaff Software Engineer\nLeadership awards",
        );
        assert_eq!(
            extract_title(&text, &Vocabulary::default()),
            FieldOutcome::Found("Staff Software Engineer".to_string())
        );

        let text = ResumeText::new("Jane Doe\nLeadership awards\n• Lead engineer on payments");
        assert_eq!(extract_title(&text, &Vocabulary::default()), FieldOutcome::NotFound);
    }

    #[test]
    fn test_summary_stops_at_blank_line() {
        let found = summary(
            "Jane Doe\n\nPROFESSIONAL SUMMARY\nBackend engineer with eight years of experience\nbuilding payment systems at scale.\n\nSomething else entirely",
        );
        assert_eq!(
            found,
            FieldOutcome::Found(
                "Backend engineer with eight years of experience building payment systems at scale."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_summary_stops_at_boundary_heading() {
        let found = summary(
            "Summary\nBackend engineer with eight years of experience building payment systems.\nExperience\nAcme | Engineer",
        );
        assert_eq!(
            found,
            FieldOutcome::Found(
                "Backend engineer with eight years of experience building payment systems.".to_string()
            )
        );
    }

    #[test]
    fn test_summary_too_short() {
        assert_eq!(summary("Summary\nShort text.\n"), FieldOutcome::NotFound);
        assert_eq!(summary("No heading at all"), FieldOutcome::NotFound);
    }

    #[test]
    fn test_summary_truncated_at_word_boundary() {
        let long = "word ".repeat(200);
        let FieldOutcome::Found(found) = summary(&format!("Summary\n{long}")) else {
            panic!("summary not found");
        };
        assert!(found.chars().count() <= 500);
        assert!(found.ends_with("word"));
    }
}
