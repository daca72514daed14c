//! Templates command - list the built-in portfolio templates.

use console::style;

use folio_core::TemplateCatalog;

pub async fn run() -> anyhow::Result<()> {
    let catalog = TemplateCatalog::new();
    let default_id = catalog.default_template().id;

    println!("{}", style("Available templates:").bold());
    println!();
    for template in catalog.iter() {
        let marker = if template.id == default_id {
            style("(default)").green().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<10} {} {}",
            style(template.id).cyan(),
            template.name,
            marker
        );
        println!("             {}", style(template.description).dim());
        println!(
            "             primary {}  secondary {}  accent {}",
            template.palette.primary, template.palette.secondary, template.palette.accent
        );
        println!();
    }

    Ok(())
}
