//! Extract command - build a profile from a single resume.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use folio_core::models::sentinel;
use folio_core::{ExtractionResult, ProfileAssembler, ProfileRecord};

use super::{explain, format_hint, load_config, read_document};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input resume (PDF or DOCX)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that were filled with placeholders
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let data = read_document(&args.input)?;
    let hint = format_hint(&args.input);
    info!("Extracting profile from {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading document...");

    let assembler = ProfileAssembler::new(&config);
    let result = tokio::task::spawn_blocking(move || assembler.extract(&data, &hint)).await?;
    pb.finish_and_clear();
    let result = result.map_err(explain)?;

    let output = format_result(&result, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        eprintln!();
        if result.missing_fields.is_empty() {
            eprintln!("{} All fields were extracted", style("ℹ").blue());
        } else {
            eprintln!("{}", style("Fields to update manually:").yellow());
            for field in &result.missing_fields {
                eprintln!("  - {}", field);
            }
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total time: {:?}", start.elapsed());
    Ok(())
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => format_csv(&result.record),
        OutputFormat::Text => Ok(format_text(&result.record)),
    }
}

const CSV_HEADER: [&str; 10] = [
    "name",
    "email",
    "phone",
    "location",
    "title",
    "experience_count",
    "education_count",
    "technical_skills",
    "soft_skills",
    "projects_count",
];

fn csv_row(record: &ProfileRecord) -> [String; 10] {
    let info = &record.personal_info;
    let real_count = |placeholders: usize, total: usize| (total - placeholders).to_string();
    [
        info.name.clone(),
        info.email.clone(),
        info.phone.clone(),
        info.location.clone(),
        info.title.clone(),
        real_count(
            record.experience.iter().filter(|e| e.is_placeholder()).count(),
            record.experience.len(),
        ),
        real_count(
            record.education.iter().filter(|e| e.is_placeholder()).count(),
            record.education.len(),
        ),
        record.skills.real_technical().collect::<Vec<_>>().join("; "),
        record.skills.real_soft().collect::<Vec<_>>().join("; "),
        real_count(
            record.projects.iter().filter(|p| p.is_placeholder()).count(),
            record.projects.len(),
        ),
    ]
}

fn format_csv(record: &ProfileRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(record: &ProfileRecord) -> String {
    let info = &record.personal_info;
    let mut output = String::new();

    output.push_str(&format!("{}\n", info.name));
    output.push_str(&format!("{}\n", info.title));
    for line in [&info.email, &info.phone, &info.location] {
        if !sentinel::is_placeholder(line) {
            output.push_str(&format!("  {}\n", line));
        }
    }
    output.push('\n');
    output.push_str(&format!("{}\n\n", info.summary));

    output.push_str("Experience:\n");
    for entry in &record.experience {
        output.push_str(&format!(
            "  {} - {} ({})\n",
            entry.position, entry.company, entry.duration
        ));
        for achievement in &entry.achievements {
            output.push_str(&format!("    * {}\n", achievement));
        }
    }
    output.push('\n');

    output.push_str("Education:\n");
    for entry in &record.education {
        output.push_str(&format!(
            "  {}, {} - {} ({})\n",
            entry.degree, entry.field, entry.institution, entry.duration
        ));
    }
    output.push('\n');

    output.push_str(&format!("Technical skills: {}\n", record.skills.technical.join(", ")));
    output.push_str(&format!("Soft skills: {}\n", record.skills.soft.join(", ")));
    output.push('\n');

    output.push_str("Projects:\n");
    for project in &record.projects {
        output.push_str(&format!("  {}", project.name));
        if let Some(link) = &project.link {
            output.push_str(&format!(" <{}>", link));
        }
        output.push('\n');
    }

    output
}

/// Summary CSV columns shared with the batch command.
pub fn summary_header() -> Vec<&'static str> {
    let mut header = vec!["filename", "status"];
    header.extend(CSV_HEADER);
    header.extend(["missing_fields", "processing_time_ms", "error"]);
    header
}

pub fn summary_row(filename: &str, result: &ExtractionResult) -> Vec<String> {
    let mut row = vec![filename.to_string(), "success".to_string()];
    row.extend(csv_row(&result.record));
    row.push(result.missing_fields.join("; "));
    row.push(result.processing_time_ms.to_string());
    row.push(String::new());
    row
}
