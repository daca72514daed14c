//! Education extraction.
//!
//! Each delimited part of a line is classified on its own, so the parser
//! copes with any ordering of institution, degree and dates.

use super::lines::{ResumeText, contains_any, split_entry, strip_bullet};
use super::patterns::{DEGREE_ABBREVIATION, GPA, SINGLE_YEAR, YEAR_RANGE};
use crate::models::{EducationEntry, Vocabulary, sentinel};
use crate::resume::FieldOutcome;

pub const INSTITUTION_NOT_SPECIFIED: &str = "Institution not specified";
pub const DEGREE_NOT_SPECIFIED: &str = "Degree not specified";

/// Degree names that are followed by "of" as part of the degree itself.
const DEGREE_WITH_OF: &[&str] = &["bachelor", "bachelors", "master", "masters", "doctor", "doctorate"];

/// An education line being assembled.
#[derive(Debug, Default)]
struct Draft {
    institution: Option<String>,
    degree: Option<String>,
    field: Option<String>,
    duration: Option<String>,
    gpa: Option<String>,
}

impl Draft {
    fn has_content(&self) -> bool {
        self.institution.is_some() || self.degree.is_some()
    }

    fn into_entry(self) -> EducationEntry {
        EducationEntry {
            institution: self
                .institution
                .unwrap_or_else(|| INSTITUTION_NOT_SPECIFIED.to_string()),
            degree: self.degree.unwrap_or_else(|| DEGREE_NOT_SPECIFIED.to_string()),
            field: self.field.unwrap_or_else(|| sentinel::NOT_AVAILABLE.to_string()),
            duration: self
                .duration
                .unwrap_or_else(|| sentinel::NOT_AVAILABLE.to_string()),
            gpa: self.gpa,
        }
    }

    /// Copy the slots `other` has and `self` lacks. Fails if they overlap.
    fn absorb(&mut self, other: Draft) -> Result<(), Draft> {
        let overlaps = (self.institution.is_some() && other.institution.is_some())
            || (self.degree.is_some() && other.degree.is_some());
        if overlaps {
            return Err(other);
        }
        self.institution = self.institution.take().or(other.institution);
        self.degree = self.degree.take().or(other.degree);
        self.field = self.field.take().or(other.field);
        self.duration = self.duration.take().or(other.duration);
        self.gpa = self.gpa.take().or(other.gpa);
        Ok(())
    }
}

pub fn extract_education(text: &ResumeText, vocabulary: &Vocabulary) -> FieldOutcome<Vec<EducationEntry>> {
    let Some(section) = text.section(&vocabulary.education) else {
        return FieldOutcome::NotFound;
    };

    let mut drafts: Vec<Draft> = Vec::new();
    for raw in section.iter().filter(|l| !l.is_empty()) {
        let line = strip_bullet(raw).unwrap_or(raw.as_str());
        let draft = classify_line(line, vocabulary);

        if !draft.has_content() {
            // Bare dates or a GPA fill gaps in the entry above.
            if let Some(last) = drafts.last_mut() {
                if last.duration.is_none() {
                    last.duration = draft.duration;
                }
                if last.gpa.is_none() {
                    last.gpa = draft.gpa;
                }
            }
            continue;
        }

        let mergeable = drafts
            .last()
            .is_some_and(|last| is_partial(last) && is_partial(&draft));
        match drafts.last_mut() {
            Some(last) if mergeable => {
                if let Err(draft) = last.absorb(draft) {
                    drafts.push(draft);
                }
            }
            _ => drafts.push(draft),
        }
    }

    if drafts.is_empty() {
        FieldOutcome::NotFound
    } else {
        FieldOutcome::Found(drafts.into_iter().map(Draft::into_entry).collect())
    }
}

/// A draft with an institution but no degree, or the other way round.
fn is_partial(draft: &Draft) -> bool {
    draft.institution.is_some() != draft.degree.is_some()
}

fn classify_line(line: &str, vocabulary: &Vocabulary) -> Draft {
    let mut draft = Draft::default();
    let mut rest = line.to_string();

    if let Some(caps) = GPA.captures(line) {
        draft.gpa = Some(caps[1].replace(' ', ""));
        if let Some(m) = caps.get(0) {
            rest = rest.replace(m.as_str(), " ");
        }
    }

    let year = YEAR_RANGE
        .find(&rest)
        .or_else(|| SINGLE_YEAR.find(&rest))
        .map(|m| m.as_str().to_string());
    if let Some(year) = year {
        rest = rest.replace(&year, " ");
        draft.duration = Some(year);
    }

    let has_degree = |part: &str| {
        contains_any(part, &vocabulary.degree_keywords) || DEGREE_ABBREVIATION.is_match(part)
    };
    let has_institution = |part: &str| contains_any(part, &vocabulary.institution_keywords);

    if !has_degree(rest.as_str()) && !has_institution(rest.as_str()) {
        return draft;
    }

    let mut parts = Vec::new();
    for part in split_entry(&rest) {
        // "Bachelor of Science, Stanford University" carries both in one part.
        if has_degree(part.as_str()) && has_institution(part.as_str()) && part.contains(',') {
            parts.extend(part.split(',').map(|p| p.trim().to_string()));
        } else {
            parts.push(part);
        }
    }

    let mut leftovers = Vec::new();
    for part in parts.into_iter().map(|p| clean_part(&p)).filter(|p| !p.is_empty()) {
        if draft.institution.is_none() && has_institution(part.as_str()) {
            draft.institution = Some(part);
        } else if draft.degree.is_none() && has_degree(part.as_str()) {
            let (degree, field) = split_degree(&part);
            draft.degree = Some(degree);
            if field.is_some() {
                draft.field = field;
            }
        } else {
            leftovers.push(part);
        }
    }

    if draft.field.is_none() && !leftovers.is_empty() {
        draft.field = Some(leftovers.join(", "));
    }
    draft
}

fn clean_part(part: &str) -> String {
    part.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|' | '-' | '–' | '—'))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split "Bachelor of Science in Computer Science" into degree and field.
fn split_degree(part: &str) -> (String, Option<String>) {
    if let Some((degree, field)) = part.split_once(" in ") {
        return (degree.trim().to_string(), Some(field.trim().to_string()));
    }
    if let Some((degree, field)) = part.split_once(" of ") {
        let degree_lower = degree.trim().to_lowercase();
        if !DEGREE_WITH_OF.contains(&degree_lower.as_str()) {
            return (degree.trim().to_string(), Some(field.trim().to_string()));
        }
    }
    (part.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> FieldOutcome<Vec<EducationEntry>> {
        extract_education(&ResumeText::new(text), &Vocabulary::default())
    }

    #[test]
    fn test_single_line_entry_with_gpa_line() {
        let text = "\
EDUCATION
University of California, Berkeley | Bachelor of Science in Computer Science | 2015 - 2019
GPA: 3.8/4.0
SKILLS";

        assert_eq!(
            parse(text),
            FieldOutcome::Found(vec![EducationEntry {
                institution: "University of California, Berkeley".to_string(),
                degree: "Bachelor of Science".to_string(),
                field: "Computer Science".to_string(),
                duration: "2015 - 2019".to_string(),
                gpa: Some("3.8/4.0".to_string()),
            }])
        );
    }

    #[test]
    fn test_two_line_entry() {
        let text = "Education\nMassachusetts Institute of Technology\nMaster of Engineering, 2021\n";

        let FieldOutcome::Found(entries) = parse(text) else {
            panic!("education not found");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "Massachusetts Institute of Technology");
        assert_eq!(entries[0].degree, "Master of Engineering");
        assert_eq!(entries[0].duration, "2021");
        assert_eq!(entries[0].field, "N/A");
    }

    #[test]
    fn test_order_and_defaults() {
        let text = "\
Academic Background
Diploma of Data Analytics - 2012
Springfield Community College - 2008 - 2010
Certificate in Cloud Computing";

        let FieldOutcome::Found(entries) = parse(text) else {
            panic!("education not found");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "Diploma");
        assert_eq!(entries[0].field, "Data Analytics");
        assert_eq!(entries[0].institution, "Springfield Community College");
        assert_eq!(entries[0].duration, "2012");
        assert_eq!(entries[1].institution, INSTITUTION_NOT_SPECIFIED);
        assert_eq!(entries[1].degree, "Certificate");
        assert_eq!(entries[1].field, "Cloud Computing");
    }

    #[test]
    fn test_no_degree_or_institution_lines() {
        assert_eq!(
            parse("Education\nSelf-taught through open source work\n"),
            FieldOutcome::NotFound
        );
        assert_eq!(parse("Jane Doe\nExperience\nAcme | Engineer"), FieldOutcome::NotFound);
    }

    #[test]
    fn test_split_degree() {
        assert_eq!(
            split_degree("Master of Business Administration"),
            ("Master of Business Administration".to_string(), None)
        );
        assert_eq!(
            split_degree("B.S. in Physics"),
            ("B.S.".to_string(), Some("Physics".to_string()))
        );
    }
}
