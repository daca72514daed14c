//! Work history extraction.

use super::lines::{ResumeText, has_entry_delimiter, split_entry, strip_bullet};
use crate::models::{ExperienceEntry, ParsingLimits, Vocabulary, sentinel};
use crate::resume::FieldOutcome;

/// Lines longer than this are prose even if they contain a delimiter.
const MAX_ENTRY_LINE_CHARS: usize = 120;
const MIN_ACHIEVEMENT_CHARS: usize = 10;
const MIN_DESCRIPTION_CHARS: usize = 20;

pub const POSITION_NOT_SPECIFIED: &str = "Position not specified";

pub fn extract_experience(
    text: &ResumeText,
    vocabulary: &Vocabulary,
    limits: &ParsingLimits,
) -> FieldOutcome<Vec<ExperienceEntry>> {
    let Some(section) = text.section(&vocabulary.experience) else {
        return FieldOutcome::NotFound;
    };

    let mut entries: Vec<ExperienceEntry> = Vec::new();
    for line in section.iter().filter(|l| !l.is_empty()) {
        if let Some(item) = strip_bullet(line) {
            if let Some(entry) = entries.last_mut() {
                if item.chars().count() > MIN_ACHIEVEMENT_CHARS {
                    entry.achievements.push(item.to_string());
                }
            }
            continue;
        }

        if line.chars().count() <= MAX_ENTRY_LINE_CHARS && has_entry_delimiter(line) {
            if entries.len() == limits.max_experience {
                break;
            }
            entries.push(entry_from_line(line));
            continue;
        }

        if let Some(entry) = entries.last_mut() {
            if entry.description.is_empty() && line.chars().count() > MIN_DESCRIPTION_CHARS {
                entry.description = line.to_string();
            }
        }
    }

    if entries.is_empty() {
        FieldOutcome::NotFound
    } else {
        FieldOutcome::Found(entries)
    }
}

fn entry_from_line(line: &str) -> ExperienceEntry {
    let mut parts = split_entry(line).into_iter();
    let company = parts.next().unwrap_or_default();
    let position = parts
        .next()
        .unwrap_or_else(|| POSITION_NOT_SPECIFIED.to_string());
    let rest: Vec<String> = parts.collect();
    let duration = if rest.is_empty() {
        sentinel::NOT_AVAILABLE.to_string()
    } else {
        rest.join(" - ")
    };

    ExperienceEntry {
        company,
        position,
        duration,
        description: String::new(),
        achievements: Vec::new(),
    }
}
