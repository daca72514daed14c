//! Stylesheet generation.
//!
//! Only the `:root` tokens depend on the template; the layout rules below
//! them are shared.

use super::templates::TemplateConfig;

pub fn stylesheet(template: &TemplateConfig) -> String {
    let palette = &template.palette;
    let mut css = String::new();
    css.push_str(&format!("/* {} template */\n", template.name));
    css.push_str(":root {\n");
    for (token, value) in [
        ("primary-color", palette.primary),
        ("secondary-color", palette.secondary),
        ("accent-color", palette.accent),
        ("background-color", palette.background),
        ("text-color", palette.text),
        ("text-light", palette.text_light),
        ("border-color", palette.border),
        ("shadow", palette.shadow),
        ("gradient-start", palette.gradient_start),
        ("gradient-end", palette.gradient_end),
    ] {
        css.push_str(&format!("  --{token}: {value};\n"));
    }
    css.push_str("  --radius: 12px;\n");
    css.push_str("  --transition: all 0.3s ease;\n");
    css.push_str("}\n\n");
    css.push_str(LAYOUT);
    css
}

const LAYOUT: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

html {
  scroll-behavior: smooth;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.6;
  color: var(--text-color);
  background: var(--background-color);
}

a {
  color: var(--primary-color);
  text-decoration: none;
}

.container {
  max-width: 1100px;
  margin: 0 auto;
  padding: 0 2rem;
}

.section {
  padding: 5rem 0;
}

.section:nth-of-type(even) {
  background: #f7fafc;
}

.section-title {
  font-size: 2.25rem;
  text-align: center;
  margin-bottom: 3rem;
}

/* Navigation */
.navbar {
  position: fixed;
  top: 0;
  width: 100%;
  z-index: 100;
  background: rgba(255, 255, 255, 0.95);
  border-bottom: 1px solid var(--border-color);
}

.nav-container {
  max-width: 1100px;
  margin: 0 auto;
  padding: 1rem 2rem;
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.nav-brand {
  font-weight: 700;
  color: var(--primary-color);
}

.nav-menu {
  display: flex;
  gap: 2rem;
  list-style: none;
}

.nav-link {
  color: var(--text-color);
  font-weight: 500;
  transition: var(--transition);
}

.nav-link:hover {
  color: var(--primary-color);
}

/* Hero */
.hero {
  min-height: 100vh;
  display: flex;
  align-items: center;
  padding-top: 5rem;
  color: #ffffff;
  background: linear-gradient(135deg, var(--gradient-start) 0%, var(--gradient-end) 100%);
}

.hero-content {
  display: grid;
  grid-template-columns: 2fr 1fr;
  gap: 4rem;
  align-items: center;
}

.greeting {
  display: block;
  font-size: 1.25rem;
  opacity: 0.9;
}

.name {
  display: block;
  font-size: 3.5rem;
  font-weight: 800;
  line-height: 1.1;
}

.hero-subtitle {
  font-size: 1.5rem;
  font-weight: 400;
  margin: 1rem 0;
  opacity: 0.95;
}

.hero-description {
  font-size: 1.1rem;
  max-width: 40rem;
  opacity: 0.9;
}

.contact-list {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem 2rem;
  margin-top: 2rem;
  list-style: none;
}

.contact-list a {
  color: #ffffff;
  border-bottom: 1px solid rgba(255, 255, 255, 0.5);
}

.hero-badge {
  width: 16rem;
  height: 16rem;
  border-radius: 50%;
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: 5rem;
  font-weight: 700;
  background: rgba(255, 255, 255, 0.15);
  border: 4px solid rgba(255, 255, 255, 0.3);
}

/* Skills */
.skills-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
  gap: 2rem;
}

.skill-group h3 {
  margin-bottom: 1rem;
}

.placeholder {
  color: var(--text-light);
  font-style: italic;
}

.chips {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
  list-style: none;
}

.chip {
  padding: 0.4rem 1rem;
  border-radius: 999px;
  font-size: 0.9rem;
  color: #ffffff;
  background: var(--primary-color);
}

.chip.soft {
  color: var(--text-color);
  background: transparent;
  border: 1px solid var(--accent-color);
}

/* Experience timeline */
.timeline {
  position: relative;
  max-width: 900px;
  margin: 0 auto;
}

.timeline::before {
  content: '';
  position: absolute;
  left: 50%;
  top: 0;
  bottom: 0;
  width: 2px;
  background: var(--border-color);
}

.timeline-item {
  position: relative;
  width: 50%;
  padding: 0 2.5rem 2.5rem;
}

.timeline-item.left {
  left: 0;
  text-align: right;
}

.timeline-item.right {
  left: 50%;
}

.timeline-marker {
  position: absolute;
  top: 0.4rem;
  width: 14px;
  height: 14px;
  border-radius: 50%;
  background: var(--secondary-color);
}

.timeline-item.left .timeline-marker {
  right: -7px;
}

.timeline-item.right .timeline-marker {
  left: -7px;
}

.timeline-content,
.project-card,
.education-card {
  padding: 1.5rem;
  border-radius: var(--radius);
  background: #ffffff;
  box-shadow: var(--shadow);
}

.timeline-content h4,
.education-card h4 {
  color: var(--primary-color);
}

.duration {
  font-size: 0.85rem;
  color: var(--text-light);
}

.achievements {
  margin-top: 0.75rem;
  padding-left: 1.25rem;
  text-align: left;
}

/* Projects */
.projects-grid,
.education-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
  gap: 2rem;
}

.project-card {
  transition: var(--transition);
}

.project-card:hover {
  transform: translateY(-4px);
}

.project-tech {
  display: flex;
  flex-wrap: wrap;
  gap: 0.4rem;
  margin-top: 1rem;
  list-style: none;
}

.tech-tag {
  padding: 0.2rem 0.6rem;
  border-radius: 6px;
  font-size: 0.8rem;
  background: var(--border-color);
}

.project-link {
  display: inline-block;
  margin-top: 1rem;
  font-weight: 600;
}

.gpa {
  font-size: 0.9rem;
  color: var(--text-light);
}

/* Footer */
.footer {
  padding: 4rem 0 2rem;
  text-align: center;
  color: #ffffff;
  background: var(--primary-color);
}

.cta h2 {
  margin-bottom: 1rem;
}

.cta-links {
  display: flex;
  justify-content: center;
  gap: 1rem;
  margin: 2rem 0;
}

.btn {
  padding: 0.75rem 1.75rem;
  border-radius: 999px;
  font-weight: 600;
  color: var(--primary-color);
  background: #ffffff;
  transition: var(--transition);
}

.btn:hover {
  background: var(--accent-color);
  color: #ffffff;
}

.copyright {
  font-size: 0.85rem;
  opacity: 0.8;
}

@media (max-width: 768px) {
  .nav-menu {
    display: none;
  }

  .hero-content {
    grid-template-columns: 1fr;
    text-align: center;
  }

  .hero-badge {
    display: none;
  }

  .contact-list {
    justify-content: center;
  }

  .name {
    font-size: 2.5rem;
  }

  .timeline::before {
    left: 1rem;
  }

  .timeline-item,
  .timeline-item.right {
    left: 0;
    width: 100%;
    padding: 0 0 2rem 3rem;
    text-align: left;
  }

  .timeline-item.left .timeline-marker,
  .timeline-item.right .timeline-marker {
    left: calc(1rem - 7px);
    right: auto;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::TemplateCatalog;

    #[test]
    fn test_tokens_follow_template() {
        let catalog = TemplateCatalog::new();
        let modern = stylesheet(catalog.resolve("modern"));
        let startup = stylesheet(catalog.resolve("startup"));

        assert!(modern.contains("--primary-color: #667eea;"));
        assert!(modern.contains("--gradient-end: #764ba2;"));
        assert!(startup.contains("--primary-color: #e74c3c;"));
        assert!(startup.contains("@media (max-width: 768px)"));
    }

    #[test]
    fn test_layout_is_shared() {
        let catalog = TemplateCatalog::new();
        let layout = |id: &str| {
            let css = stylesheet(catalog.resolve(id));
            let start = css.find("* {").unwrap();
            css[start..].to_string()
        };
        assert_eq!(layout("creative"), layout("executive"));
    }
}
