//! Portfolio site generation from a [`ProfileRecord`](crate::models::ProfileRecord).

mod renderer;
mod stylesheet;
mod templates;

pub use renderer::{PortfolioRenderer, PortfolioSite, targeted_summary};
pub use stylesheet::stylesheet;
pub use templates::{DEFAULT_TEMPLATE, Palette, TemplateCatalog, TemplateConfig};
