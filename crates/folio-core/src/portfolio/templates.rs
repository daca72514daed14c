//! Built-in portfolio templates.

use serde::Serialize;
use tracing::warn;

/// Template used when none is requested or the requested one is unknown.
pub const DEFAULT_TEMPLATE: &str = "modern";

/// Color tokens emitted into the stylesheet's `:root` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub text_light: &'static str,
    pub border: &'static str,
    pub shadow: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
}

/// A named visual theme for the generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub palette: Palette,
}

const NEUTRAL_TEXT: &str = "#2d3748";
const NEUTRAL_TEXT_LIGHT: &str = "#718096";
const NEUTRAL_BORDER: &str = "#e2e8f0";
const WHITE: &str = "#ffffff";

static TEMPLATES: [TemplateConfig; 4] = [
    TemplateConfig {
        id: "modern",
        name: "Modern Developer",
        description: "Clean, minimalist design perfect for tech roles",
        palette: Palette {
            primary: "#667eea",
            secondary: "#764ba2",
            accent: "#f093fb",
            background: WHITE,
            text: NEUTRAL_TEXT,
            text_light: NEUTRAL_TEXT_LIGHT,
            border: NEUTRAL_BORDER,
            shadow: "0 10px 25px rgba(0, 0, 0, 0.1)",
            gradient_start: "#667eea",
            gradient_end: "#764ba2",
        },
    },
    TemplateConfig {
        id: "creative",
        name: "Creative Professional",
        description: "Bold, colorful design for creative positions",
        palette: Palette {
            primary: "#ff6b6b",
            secondary: "#4ecdc4",
            accent: "#45b7d1",
            background: WHITE,
            text: NEUTRAL_TEXT,
            text_light: NEUTRAL_TEXT_LIGHT,
            border: NEUTRAL_BORDER,
            shadow: "0 10px 25px rgba(255, 107, 107, 0.15)",
            gradient_start: "#ff6b6b",
            gradient_end: "#4ecdc4",
        },
    },
    TemplateConfig {
        id: "executive",
        name: "Executive",
        description: "Professional, corporate-friendly layout",
        palette: Palette {
            primary: "#2c3e50",
            secondary: "#34495e",
            accent: "#3498db",
            background: WHITE,
            text: NEUTRAL_TEXT,
            text_light: NEUTRAL_TEXT_LIGHT,
            border: NEUTRAL_BORDER,
            shadow: "0 10px 25px rgba(44, 62, 80, 0.15)",
            gradient_start: "#2c3e50",
            gradient_end: "#34495e",
        },
    },
    TemplateConfig {
        id: "startup",
        name: "Startup Ready",
        description: "Dynamic design for fast-paced environments",
        palette: Palette {
            primary: "#e74c3c",
            secondary: "#f39c12",
            accent: "#9b59b6",
            background: WHITE,
            text: NEUTRAL_TEXT,
            text_light: NEUTRAL_TEXT_LIGHT,
            border: NEUTRAL_BORDER,
            shadow: "0 10px 25px rgba(231, 76, 60, 0.15)",
            gradient_start: "#e74c3c",
            gradient_end: "#f39c12",
        },
    },
];

/// Lookup over the built-in templates with a configurable fallback.
#[derive(Debug, Clone, Copy)]
pub struct TemplateCatalog {
    fallback: &'static TemplateConfig,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            fallback: &TEMPLATES[0],
        }
    }

    /// Use `id` as the fallback template. Unknown ids keep the current one.
    pub fn with_default(mut self, id: &str) -> Self {
        match self.get(id) {
            Some(template) => self.fallback = template,
            None => warn!("Unknown default template '{}', keeping '{}'", id, self.fallback.id),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&'static TemplateConfig> {
        TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
    }

    /// The template for `id`, or the fallback when it is unknown.
    pub fn resolve(&self, id: &str) -> &'static TemplateConfig {
        self.get(id).unwrap_or_else(|| {
            warn!("Unknown template '{}', using '{}'", id, self.fallback.id);
            self.fallback
        })
    }

    pub fn default_template(&self) -> &'static TemplateConfig {
        self.fallback
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TemplateConfig> {
        TEMPLATES.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(|t| t.id).collect()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_order() {
        assert_eq!(
            TemplateCatalog::new().ids(),
            vec!["modern", "creative", "executive", "startup"]
        );
    }

    #[test]
    fn test_resolve_falls_back() {
        let catalog = TemplateCatalog::new();
        assert_eq!(catalog.resolve("nonexistent-template-id").id, DEFAULT_TEMPLATE);
        assert_eq!(catalog.resolve("Executive").id, "executive");
    }

    #[test]
    fn test_with_default() {
        let catalog = TemplateCatalog::new().with_default("startup");
        assert_eq!(catalog.resolve("missing").id, "startup");

        let catalog = TemplateCatalog::new().with_default("missing");
        assert_eq!(catalog.default_template().id, "modern");
    }
}
