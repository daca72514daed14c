//! Static HTML portfolio rendering.

use serde::Serialize;
use tracing::debug;

use super::stylesheet::stylesheet;
use super::templates::{TemplateCatalog, TemplateConfig};
use crate::models::{PortfolioConfig, ProfileRecord, sentinel};

/// Relative stylesheet link the generated page uses.
const STYLESHEET_LINK: &str = r#"<link rel="stylesheet" href="styles.css">"#;

/// A rendered site: one HTML page and its stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSite {
    pub html: String,
    pub css: String,
    /// The template actually used, after fallback.
    pub template_id: String,
}

impl PortfolioSite {
    /// A single self-contained document with the stylesheet inlined.
    pub fn preview_document(&self) -> String {
        self.html
            .replacen(STYLESHEET_LINK, &format!("<style>\n{}</style>", self.css), 1)
    }

    /// File names and contents for packaging as a static site.
    pub fn files(&self) -> [(&'static str, &str); 2] {
        [("index.html", self.html.as_str()), ("styles.css", self.css.as_str())]
    }
}

/// Renders a [`ProfileRecord`] into a static site.
///
/// Rendering is pure: the same profile, template and role always produce
/// byte-identical output, and it never fails.
#[derive(Debug, Clone, Default)]
pub struct PortfolioRenderer {
    catalog: TemplateCatalog,
    copyright_year: Option<i32>,
}

impl PortfolioRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self {
            catalog: TemplateCatalog::new().with_default(&config.default_template),
            copyright_year: config.copyright_year,
        }
    }

    /// Print a copyright year in the footer.
    pub fn with_copyright_year(mut self, year: i32) -> Self {
        self.copyright_year = Some(year);
        self
    }

    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Render `profile` with the template `template_id`.
    ///
    /// An unknown template id falls back to the catalog default. A non-empty
    /// `target_role` appends a role clause to the summary.
    pub fn render(
        &self,
        profile: &ProfileRecord,
        template_id: &str,
        target_role: Option<&str>,
    ) -> PortfolioSite {
        let template = self.catalog.resolve(template_id);
        debug!("Rendering portfolio with template '{}'", template.id);

        PortfolioSite {
            html: self.page(profile, template, target_role),
            css: stylesheet(template),
            template_id: template.id.to_string(),
        }
    }

    fn page(&self, profile: &ProfileRecord, template: &TemplateConfig, target_role: Option<&str>) -> String {
        let info = &profile.personal_info;
        let sections = Sections::of(profile);

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        html.push_str(&format!("<title>{} - Portfolio</title>\n", escape_html(&info.name)));
        html.push_str(STYLESHEET_LINK);
        html.push_str("\n</head>\n");
        html.push_str(&format!("<body class=\"{}-template\">\n", template.id));

        render_nav(&mut html, profile, &sections);
        render_hero(&mut html, profile, target_role);
        render_skills(&mut html, profile);
        render_experience(&mut html, profile);
        if sections.projects {
            render_projects(&mut html, profile);
        }
        render_education(&mut html, profile);
        self.render_footer(&mut html, profile, &sections);

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_footer(&self, html: &mut String, profile: &ProfileRecord, sections: &Sections) {
        let info = &profile.personal_info;
        html.push_str("<footer id=\"contact\" class=\"footer\">\n<div class=\"container\">\n");
        if sections.contact {
            html.push_str("<div class=\"cta\">\n<h2>Let's Work Together</h2>\n");
            html.push_str("<p>I'm always interested in new opportunities and exciting projects.</p>\n");
            html.push_str("<div class=\"cta-links\">\n");
            if let Some(email) = real(&info.email) {
                html.push_str(&format!(
                    "<a class=\"btn\" href=\"mailto:{}\">Email Me</a>\n",
                    escape_html(email)
                ));
            }
            if let Some(phone) = real(&info.phone) {
                html.push_str(&format!(
                    "<a class=\"btn\" href=\"tel:{}\">Call Me</a>\n",
                    escape_html(&dial_string(phone))
                ));
            }
            html.push_str("</div>\n</div>\n");
        }

        let holder = real(&info.name).map(escape_html);
        let line = match (self.copyright_year, holder) {
            (Some(year), Some(name)) => format!("&copy; {year} {name}. All rights reserved."),
            (Some(year), None) => format!("&copy; {year}. All rights reserved."),
            (None, Some(name)) => format!("&copy; {name}. All rights reserved."),
            (None, None) => "All rights reserved.".to_string(),
        };
        html.push_str(&format!("<p class=\"copyright\">{line}</p>\n"));
        html.push_str("</div>\n</footer>\n");
    }
}

const SKILLS_PLACEHOLDER: &str = "Skills not found. Please update manually.";

/// Which optional sections the page carries.
struct Sections {
    projects: bool,
    contact: bool,
}

impl Sections {
    fn of(profile: &ProfileRecord) -> Self {
        let info = &profile.personal_info;
        Self {
            projects: profile.has_projects(),
            contact: real(&info.email).is_some() || real(&info.phone).is_some(),
        }
    }
}

fn render_nav(html: &mut String, profile: &ProfileRecord, sections: &Sections) {
    html.push_str("<nav class=\"navbar\">\n<div class=\"nav-container\">\n");
    html.push_str(&format!(
        "<div class=\"nav-brand\">{}</div>\n",
        escape_html(&profile.personal_info.name)
    ));
    html.push_str("<ul class=\"nav-menu\">\n");
    let links = [
        ("home", "Home", true),
        ("skills", "Skills", true),
        ("experience", "Experience", true),
        ("projects", "Projects", sections.projects),
        ("education", "Education", true),
        ("contact", "Contact", sections.contact),
    ];
    for (anchor, label, present) in links {
        if present {
            html.push_str(&format!(
                "<li><a href=\"#{anchor}\" class=\"nav-link\">{label}</a></li>\n"
            ));
        }
    }
    html.push_str("</ul>\n</div>\n</nav>\n");
}

fn render_hero(html: &mut String, profile: &ProfileRecord, target_role: Option<&str>) {
    let info = &profile.personal_info;
    html.push_str("<section id=\"home\" class=\"hero\">\n<div class=\"container hero-content\">\n");
    html.push_str("<div class=\"hero-text\">\n<h1 class=\"hero-title\">\n");
    html.push_str("<span class=\"greeting\">Hello, I'm</span>\n");
    html.push_str(&format!("<span class=\"name\">{}</span>\n", escape_html(&info.name)));
    html.push_str("</h1>\n");
    html.push_str(&format!("<h2 class=\"hero-subtitle\">{}</h2>\n", escape_html(&info.title)));
    html.push_str(&format!(
        "<p class=\"hero-description\">{}</p>\n",
        escape_html(&targeted_summary(&info.summary, target_role))
    ));

    let mut contacts = Vec::new();
    if let Some(email) = real(&info.email) {
        let email = escape_html(email);
        contacts.push(format!("<a href=\"mailto:{email}\">{email}</a>"));
    }
    if let Some(phone) = real(&info.phone) {
        contacts.push(format!(
            "<a href=\"tel:{}\">{}</a>",
            escape_html(&dial_string(phone)),
            escape_html(phone)
        ));
    }
    if let Some(location) = real(&info.location) {
        contacts.push(escape_html(location));
    }
    if !contacts.is_empty() {
        html.push_str("<ul class=\"contact-list\">\n");
        for contact in contacts {
            html.push_str(&format!("<li class=\"contact-item\">{contact}</li>\n"));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"hero-image\"><div class=\"hero-badge\">{}</div></div>\n",
        escape_html(&initials(&info.name))
    ));
    html.push_str("</div>\n</section>\n");
}

fn render_skills(html: &mut String, profile: &ProfileRecord) {
    html.push_str("<section id=\"skills\" class=\"section skills\">\n<div class=\"container\">\n");
    html.push_str("<h2 class=\"section-title\">Skills</h2>\n<div class=\"skills-grid\">\n");
    let groups = [
        ("Technical Skills", "chip", profile.skills.real_technical().collect::<Vec<_>>()),
        ("Soft Skills", "chip soft", profile.skills.real_soft().collect()),
    ];
    if groups.iter().all(|(_, _, skills)| skills.is_empty()) {
        html.push_str(&format!("<p class=\"placeholder\">{SKILLS_PLACEHOLDER}</p>\n"));
    }
    for (heading, class, skills) in groups {
        if skills.is_empty() {
            continue;
        }
        html.push_str(&format!("<div class=\"skill-group\">\n<h3>{heading}</h3>\n<ul class=\"chips\">\n"));
        for skill in skills {
            html.push_str(&format!("<li class=\"{class}\">{}</li>\n", escape_html(skill)));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n</div>\n</section>\n");
}

fn render_experience(html: &mut String, profile: &ProfileRecord) {
    html.push_str("<section id=\"experience\" class=\"section experience\">\n<div class=\"container\">\n");
    html.push_str("<h2 class=\"section-title\">Professional Experience</h2>\n<div class=\"timeline\">\n");
    for (index, entry) in profile.experience.iter().enumerate() {
        let side = if index % 2 == 0 { "left" } else { "right" };
        html.push_str(&format!("<div class=\"timeline-item {side}\">\n"));
        html.push_str("<div class=\"timeline-marker\"></div>\n<div class=\"timeline-content\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&entry.position)));
        html.push_str(&format!("<h4>{}</h4>\n", escape_html(&entry.company)));
        html.push_str(&format!("<span class=\"duration\">{}</span>\n", escape_html(&entry.duration)));
        if !entry.description.is_empty() {
            html.push_str(&format!(
                "<p class=\"timeline-description\">{}</p>\n",
                escape_html(&entry.description)
            ));
        }
        if !entry.achievements.is_empty() {
            html.push_str("<ul class=\"achievements\">\n");
            for achievement in &entry.achievements {
                html.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</div>\n</div>\n</section>\n");
}

fn render_projects(html: &mut String, profile: &ProfileRecord) {
    html.push_str("<section id=\"projects\" class=\"section projects\">\n<div class=\"container\">\n");
    html.push_str("<h2 class=\"section-title\">Featured Projects</h2>\n<div class=\"projects-grid\">\n");
    for project in profile.projects.iter().filter(|p| !p.is_placeholder()) {
        html.push_str("<article class=\"project-card\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&project.name)));
        if !project.description.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", escape_html(&project.description)));
        }
        if !project.technologies.is_empty() {
            html.push_str("<ul class=\"project-tech\">\n");
            for tech in &project.technologies {
                html.push_str(&format!("<li class=\"tech-tag\">{}</li>\n", escape_html(tech)));
            }
            html.push_str("</ul>\n");
        }
        if let Some(link) = project.link.as_deref().filter(|l| is_web_link(l)) {
            html.push_str(&format!(
                "<a class=\"project-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View Project</a>\n",
                escape_html(link)
            ));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</div>\n</div>\n</section>\n");
}

fn render_education(html: &mut String, profile: &ProfileRecord) {
    html.push_str("<section id=\"education\" class=\"section education\">\n<div class=\"container\">\n");
    html.push_str("<h2 class=\"section-title\">Education</h2>\n<div class=\"education-grid\">\n");
    for entry in &profile.education {
        html.push_str("<article class=\"education-card\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&entry.degree)));
        html.push_str(&format!("<h4>{}</h4>\n", escape_html(&entry.institution)));
        if entry.field != sentinel::NOT_AVAILABLE {
            html.push_str(&format!("<p>{}</p>\n", escape_html(&entry.field)));
        }
        html.push_str(&format!("<span class=\"duration\">{}</span>\n", escape_html(&entry.duration)));
        if let Some(gpa) = &entry.gpa {
            html.push_str(&format!("<p class=\"gpa\">GPA: {}</p>\n", escape_html(gpa)));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</div>\n</div>\n</section>\n");
}

/// The summary with the role-targeting clause appended when a role is given.
pub fn targeted_summary(summary: &str, target_role: Option<&str>) -> String {
    match target_role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => format!(
            "{} Currently seeking opportunities as a {} to leverage my expertise and drive innovation.",
            summary.trim_end(),
            role
        ),
        None => summary.to_string(),
    }
}

fn real(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || sentinel::is_placeholder(value) {
        None
    } else {
        Some(value)
    }
}

fn is_web_link(link: &str) -> bool {
    let lower = link.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Phone number reduced to what a `tel:` URI accepts.
fn dial_string(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn initials(name: &str) -> String {
    if real(name).is_none() {
        return String::new();
    }
    name.split_whitespace()
        .filter(|w| !w.ends_with('.'))
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

fn escape_html(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '<' => "&lt;".into(),
            '>' => "&gt;".into(),
            '&' => "&amp;".into(),
            '"' => "&quot;".into(),
            '\'' => "&#39;".into(),
            _ => ch.to_string(),
        })
        .collect()
}
