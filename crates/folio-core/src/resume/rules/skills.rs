//! Vocabulary-driven skill matching.

use regex::Regex;
use tracing::trace;

use super::lines::ResumeText;

/// Matches vocabulary terms against resume text.
///
/// Terms match case-insensitively on word boundaries. A camelCase term also
/// matches its split form (`JavaScript` ~ `Java Script`), since normalization
/// inserts that space. Longer terms are matched first and their spans blanked,
/// so `Java Script` does not also count as `Java`.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    terms: Vec<(usize, String, Regex)>,
}

impl SkillMatcher {
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        let mut terms: Vec<(usize, String, Regex)> = vocabulary
            .iter()
            .enumerate()
            .filter_map(|(order, term)| {
                let term = term.as_ref().trim();
                if term.is_empty() {
                    return None;
                }
                let regex = Regex::new(&term_pattern(term)).ok()?;
                Some((order, display_form(term), regex))
            })
            .collect();
        terms.sort_by_key(|(_, display, _)| std::cmp::Reverse(display.len()));
        Self { terms }
    }

    /// Distinct matched terms in vocabulary order, at most `limit`.
    pub fn find(&self, text: &str, limit: usize) -> Vec<String> {
        let mut haystack = text.to_string();
        let mut found: Vec<(usize, &str)> = Vec::new();

        for (order, skill, regex) in &self.terms {
            let mut matched = false;
            while let Some(range) = regex.captures(&haystack).and_then(|c| c.get(1)).map(|m| m.range()) {
                let blank = " ".repeat(range.len());
                haystack.replace_range(range, &blank);
                matched = true;
            }
            if matched && !found.iter().any(|(_, d)| d.eq_ignore_ascii_case(skill)) {
                trace!(skill = skill.as_str(), "Matched skill");
                found.push((*order, skill.as_str()));
            }
        }

        found.sort_by_key(|(order, _)| *order);
        found
            .into_iter()
            .take(limit)
            .map(|(_, display)| display.to_string())
            .collect()
    }
}

/// Regex for one term with the match in group 1.
fn term_pattern(term: &str) -> String {
    let mut body = String::new();
    let mut prev: Option<char> = None;
    for c in term.chars() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                body.push_str(" ?");
            }
        }
        if c.is_whitespace() {
            body.push_str(r"\s+");
        } else {
            body.push_str(&regex::escape(&c.to_string()));
        }
        prev = Some(c);
    }
    format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}])({body})(?:[^\p{{L}}\p{{N}}]|$)")
}

/// Vocabulary spelling with the first letter of each word upper-cased.
fn display_form(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Technical and soft skills found anywhere in the document.
pub fn extract_skills(
    text: &ResumeText,
    technical: &SkillMatcher,
    soft: &SkillMatcher,
    max_technical: usize,
    max_soft: usize,
) -> (Vec<String>, Vec<String>) {
    let full = text.lines().join("\n");
    (technical.find(&full, max_technical), soft.find(&full, max_soft))
}
