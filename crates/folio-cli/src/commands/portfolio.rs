//! Portfolio command - render a static portfolio site.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::Args;
use console::style;
use tracing::{debug, info};

use folio_core::{PortfolioRenderer, PortfolioSite, ProfileAssembler, ProfileRecord};

use super::{explain, format_hint, load_config, read_document};

/// Arguments for the portfolio command.
#[derive(Args)]
pub struct PortfolioArgs {
    /// Profile JSON, or a resume (PDF or DOCX) to extract first
    #[arg(required = true)]
    input: PathBuf,

    /// Template id (see `folio templates`)
    #[arg(short, long)]
    template: Option<String>,

    /// Target role mentioned in the summary
    #[arg(short, long)]
    role: Option<String>,

    /// Output directory, or archive path with --zip
    #[arg(short, long, default_value = "portfolio")]
    output: PathBuf,

    /// Write a zip archive instead of a directory
    #[arg(long)]
    zip: bool,

    /// Also write a single-file preview with inlined styles
    #[arg(long)]
    preview: bool,
}

pub async fn run(args: PortfolioArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let profile = load_profile(&args.input, ProfileAssembler::new(&config)).await?;

    let year = config
        .portfolio
        .copyright_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let renderer = PortfolioRenderer::from_config(&config.portfolio).with_copyright_year(year);

    let template = args
        .template
        .as_deref()
        .unwrap_or(&config.portfolio.default_template);
    let site = renderer.render(&profile, template, args.role.as_deref());
    info!("Rendered portfolio with template '{}'", site.template_id);

    let written = if args.zip {
        let archive = archive_path(&args.output);
        write_archive(&archive, &site)?;
        archive
    } else {
        write_directory(&args.output, &site)?;
        args.output.clone()
    };
    println!(
        "{} Portfolio ({}) written to {}",
        style("✓").green(),
        site.template_id,
        written.display()
    );

    if args.preview {
        let preview_path = preview_path(&args.output, args.zip);
        fs::write(&preview_path, site.preview_document())?;
        println!(
            "{} Preview written to {}",
            style("✓").green(),
            preview_path.display()
        );
    }

    Ok(())
}

/// Read a stored profile, or extract one from a resume document.
async fn load_profile(input: &Path, assembler: ProfileAssembler) -> anyhow::Result<ProfileRecord> {
    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        debug!("Loading profile from {}", input.display());
        let content = fs::read_to_string(input)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let data = read_document(input)?;
    let hint = format_hint(input);
    let result = tokio::task::spawn_blocking(move || assembler.extract_profile(&data, &hint)).await?;
    result.map_err(explain)
}

fn write_directory(dir: &Path, site: &PortfolioSite) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    for (name, content) in site.files() {
        fs::write(dir.join(name), content)?;
    }
    Ok(())
}

fn write_archive(path: &Path, site: &PortfolioSite) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut zip = zip::ZipWriter::new(fs::File::create(path)?);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in site.files() {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

fn archive_path(output: &Path) -> PathBuf {
    if output.extension().is_some_and(|e| e.eq_ignore_ascii_case("zip")) {
        output.to_path_buf()
    } else {
        output.with_extension("zip")
    }
}

fn preview_path(output: &Path, zip: bool) -> PathBuf {
    if zip {
        archive_path(output).with_extension("preview.html")
    } else {
        output.join("preview.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_path() {
        assert_eq!(archive_path(Path::new("site")), PathBuf::from("site.zip"));
        assert_eq!(archive_path(Path::new("out/site.ZIP")), PathBuf::from("out/site.ZIP"));
    }

    #[test]
    fn test_preview_path() {
        assert_eq!(preview_path(Path::new("site"), false), PathBuf::from("site/preview.html"));
        assert_eq!(preview_path(Path::new("site"), true), PathBuf::from("site.preview.html"));
    }
}
