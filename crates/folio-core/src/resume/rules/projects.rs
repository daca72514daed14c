//! Project extraction.

use super::lines::{ResumeText, contains_any, strip_bullet};
use super::patterns::{SPACED_DASH, TECHNOLOGIES, URL};
use crate::models::{ParsingLimits, ProjectEntry, Vocabulary};
use crate::resume::FieldOutcome;

const MIN_NAME_CHARS: usize = 10;
const MAX_NAME_CHARS: usize = 100;
const MAX_NAME_WORDS: usize = 8;
const MIN_DESCRIPTION_CHARS: usize = 20;
const TECHNOLOGY_CHARS: std::ops::RangeInclusive<usize> = 2..=20;

const TECHNOLOGY_MARKERS: &[&str] = &["technologies", "tech stack"];

pub fn extract_projects(
    text: &ResumeText,
    vocabulary: &Vocabulary,
    limits: &ParsingLimits,
) -> FieldOutcome<Vec<ProjectEntry>> {
    let Some(section) = text.section(&vocabulary.projects) else {
        return FieldOutcome::NotFound;
    };

    let mut projects: Vec<ProjectEntry> = Vec::new();
    for raw in section.iter().filter(|l| !l.is_empty()) {
        let bullet = strip_bullet(raw);
        let mut line = bullet.unwrap_or(raw.as_str()).to_string();

        let url = URL.find(&line).map(|m| m.as_str().to_string());
        if let Some(url) = &url {
            line = line.replace(url.as_str(), " ").trim().to_string();
        }

        if !line.is_empty() && !apply_line(&mut projects, line, bullet.is_some(), limits) {
            break;
        }

        // The link belongs to whichever project is current after this line.
        if let (Some(url), Some(project)) = (url, projects.last_mut()) {
            if project.link.is_none() {
                project.link = Some(with_scheme(&url));
            }
        }
    }

    if projects.is_empty() {
        FieldOutcome::NotFound
    } else {
        FieldOutcome::Found(projects)
    }
}

/// Fold one section line into the project list; returns `false` once the cap is hit.
fn apply_line(
    projects: &mut Vec<ProjectEntry>,
    line: String,
    is_bullet: bool,
    limits: &ParsingLimits,
) -> bool {
    if !is_bullet {
        if let Some(project) = inline_project(&line) {
            return push_project(projects, project, limits.max_projects);
        }
    }

    if contains_any(&line, TECHNOLOGY_MARKERS) {
        if let Some(project) = projects.last_mut() {
            project.technologies = parse_technologies(&line);
        }
        return true;
    }

    if !is_bullet && is_name_line(&line) {
        return push_project(projects, named_project(&line), limits.max_projects);
    }

    if let Some(project) = projects.last_mut() {
        if project.description.is_empty() && line.chars().count() > MIN_DESCRIPTION_CHARS {
            project.description = line;
        }
    }
    true
}

/// Append unless the cap is reached; returns `false` when full.
fn push_project(projects: &mut Vec<ProjectEntry>, project: ProjectEntry, max: usize) -> bool {
    if projects.len() >= max {
        return false;
    }
    projects.push(project);
    true
}

fn is_name_line(line: &str) -> bool {
    let len = line.chars().count();
    (MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len)
        && line.split_whitespace().count() <= MAX_NAME_WORDS
        && !line.ends_with('.')
        && !contains_any(line, TECHNOLOGY_MARKERS)
}

/// "Name | Rust, Tokio" or "Name | A short description".
fn named_project(line: &str) -> ProjectEntry {
    let (name, rest) = match line.split_once('|') {
        Some((name, rest)) => (name.trim(), rest.trim()),
        None => (line.trim(), ""),
    };

    let mut project = ProjectEntry {
        name: name.to_string(),
        description: String::new(),
        technologies: Vec::new(),
        link: None,
    };
    if rest.contains(',') || contains_any(rest, TECHNOLOGY_MARKERS) {
        project.technologies = parse_technologies(rest);
    } else if !rest.is_empty() {
        project.description = rest.to_string();
    }
    project
}

/// "Name - description. Technologies: A, B" on a single line.
fn inline_project(line: &str) -> Option<ProjectEntry> {
    let mut split = SPACED_DASH.splitn(line, 2);
    let name = split.next()?.trim();
    let rest = split.next()?.trim();
    if name.is_empty()
        || name.split_whitespace().count() > MAX_NAME_WORDS
        || contains_any(name, TECHNOLOGY_MARKERS)
        || rest.chars().count() <= MIN_DESCRIPTION_CHARS
    {
        return None;
    }

    let (description, technologies) = match TECHNOLOGIES.find(rest) {
        Some(m) => (rest[..m.start()].trim(), parse_technologies(m.as_str())),
        None => (rest, Vec::new()),
    };

    Some(ProjectEntry {
        name: name.to_string(),
        description: description.to_string(),
        technologies,
        link: None,
    })
}

/// Split the list after a "Technologies:" marker on commas (or whitespace).
fn parse_technologies(line: &str) -> Vec<String> {
    let list = TECHNOLOGIES
        .captures(line)
        .and_then(|c| c.get(1))
        .map_or(line, |m| m.as_str());

    let items: Vec<&str> = if list.contains(',') || list.contains(';') {
        list.split([',', ';']).collect()
    } else {
        list.split_whitespace().collect()
    };

    items
        .into_iter()
        .map(|item| item.trim().trim_end_matches('.').trim())
        .filter(|item| TECHNOLOGY_CHARS.contains(&item.chars().count()))
        .map(str::to_string)
        .collect()
}

fn with_scheme(url: &str) -> String {
    let url = url.trim_end_matches(['.', ',', ';']);
    if url.to_lowercase().starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
