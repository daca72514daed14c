//! Email, phone and location extraction.

use super::lines::{ResumeText, contains_any, is_heading_line};
use super::patterns::{
    EMAIL, LOCATION_GENERIC, LOCATION_REGION, PHONE_INTERNATIONAL, PHONE_NORTH_AMERICA,
    whole_word_pattern,
};
use crate::models::{ParsingLimits, Vocabulary};
use crate::resume::FieldOutcome;

const MAX_LOCATION_CHARS: usize = 50;

/// First email address anywhere in the text.
pub fn extract_email(text: &ResumeText) -> FieldOutcome<String> {
    text.non_empty()
        .find_map(|line| EMAIL.find(line))
        .map(|m| m.as_str().to_string())
        .into()
}

/// First North-American phone number, else the first international one.
pub fn extract_phone(text: &ResumeText) -> FieldOutcome<String> {
    let north_american = text
        .non_empty()
        .find_map(|line| PHONE_NORTH_AMERICA.find(line))
        .map(|m| m.as_str().trim().to_string());
    if north_american.is_some() {
        return north_american.into();
    }

    text.non_empty()
        .flat_map(|line| PHONE_INTERNATIONAL.find_iter(line))
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            (10..=15).contains(&digits)
        })
        .map(str::to_string)
        .into()
}

/// `City, XX` or `City, Country` from the contact header.
pub fn extract_location(
    text: &ResumeText,
    vocabulary: &Vocabulary,
    limits: &ParsingLimits,
) -> FieldOutcome<String> {
    let header: Vec<&str> = text
        .header(limits.header_lines)
        .filter(|line| !line.contains('@'))
        .collect();

    let region = header
        .iter()
        .filter_map(|line| LOCATION_REGION.find(line))
        .map(|m| m.as_str())
        .find(|m| m.len() <= MAX_LOCATION_CHARS);
    if let Some(location) = region {
        return FieldOutcome::Found(location.to_string());
    }

    // The generic pattern also matches "Engineer, Platform" or "Summary, Objective",
    // so lines carrying title keywords or section headings are skipped.
    let titles = whole_word_pattern(&vocabulary.title_keywords);
    let headings: Vec<&String> = vocabulary
        .summary
        .headings
        .iter()
        .chain(&vocabulary.experience.headings)
        .chain(&vocabulary.education.headings)
        .chain(&vocabulary.projects.headings)
        .collect();

    header
        .iter()
        .filter(|line| !titles.as_ref().is_some_and(|re| re.is_match(line)))
        .filter(|line| !is_heading_line(line, &headings) && !contains_any(line, &vocabulary.institution_keywords))
        .filter_map(|line| LOCATION_GENERIC.find(line))
        .map(|m| m.as_str())
        .find(|m| m.len() <= MAX_LOCATION_CHARS)
        .map(str::to_string)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn location(text: &str) -> FieldOutcome<String> {
        extract_location(
            &ResumeText::new(text),
            &Vocabulary::default(),
            &ParsingLimits::default(),
        )
    }

    #[test]
    fn test_extract_email() {
        let text = ResumeText::new("Jane Doe\nContact: jane.doe@example.com | 555-234-5678");
        assert_eq!(
            extract_email(&text),
            FieldOutcome::Found("jane.doe@example.com".to_string())
        );
        assert_eq!(extract_email(&ResumeText::new("no address here")), FieldOutcome::NotFound);
    }

    #[test]
    fn test_extract_phone_north_american() {
        let text = ResumeText::new("Phone: +1 (555) 123-4567\nAlt: +44 20 7946 0958");
        assert_eq!(
            extract_phone(&text),
            FieldOutcome::Found("+1 (555) 123-4567".to_string())
        );
    }

    #[test]
    fn test_extract_phone_international() {
        let text = ResumeText::new("Tel +44 20 7946 0958\nSince 2015 - 2019");
        assert_eq!(
            extract_phone(&text),
            FieldOutcome::Found("+44 20 7946 0958".to_string())
        );
        assert_eq!(
            extract_phone(&ResumeText::new("Class of 2019, room 42")),
            FieldOutcome::NotFound
        );
    }

    #[test]
    fn test_location_region_code_wins() {
        assert_eq!(
            location("Jane Doe\nBerlin, Germany\nPortland, OR"),
            FieldOutcome::Found("Portland, OR".to_string())
        );
    }

    #[test]
    fn test_location_generic() {
        assert_eq!(
            location("Jane Doe\nLocation: Berlin, Germany"),
            FieldOutcome::Found("Berlin, Germany".to_string())
        );
    }

    #[test]
    fn test_location_skips_titles_and_email_lines() {
        assert_eq!(
            location("Jane Doe\nSenior Engineer, Platform\nJane, Doe@example.com"),
            FieldOutcome::NotFound
        );
    }

    #[test]
    fn test_location_only_in_header() {
        let mut text = String::from("Jane Doe\n");
        for i in 0..20 {
            text.push_str(&format!("line number {i}\n"));
        }
        text.push_str("Portland, OR");
        assert_eq!(location(&text), FieldOutcome::NotFound);
    }
}
