//! Batch command - extract profiles from many resumes concurrently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::StreamExt;
use futures_util::stream;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use folio_core::{ExtractionResult, ProfileAssembler};

use super::extract::{OutputFormat, format_result, summary_header, summary_row};
use super::{explain, format_hint, load_config, read_document};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching resumes
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files processed at once
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for a single file.
struct FileOutcome {
    path: PathBuf,
    result: Result<ExtractionResult, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "docx")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let assembler = Arc::new(ProfileAssembler::new(&config));
    let mut pending = stream::iter(files)
        .map(|path| {
            let assembler = Arc::clone(&assembler);
            async move { process_file(path, assembler).await }
        })
        .buffer_unordered(args.jobs.max(1));

    let mut outcomes = Vec::new();
    while let Some(outcome) = pending.next().await {
        overall_pb.inc(1);
        if let Err(message) = &outcome.result {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", outcome.path.display(), message);
            } else {
                error!("Failed to process {}: {}", outcome.path.display(), message);
                overall_pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", outcome.path.display(), message);
            }
        }
        outcomes.push(outcome);
    }
    overall_pb.finish_with_message("Complete");

    // Completion order is arbitrary; report in path order.
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));

    if let Some(output_dir) = &args.output_dir {
        for outcome in &outcomes {
            if let Ok(result) = &outcome.result {
                let stem = outcome
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("profile");
                let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
                fs::write(&output_path, format_result(result, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            if let Err(message) = &outcome.result {
                println!("  - {}: {}", outcome.path.display(), message);
            }
        }
    }

    Ok(())
}

async fn process_file(path: PathBuf, assembler: Arc<ProfileAssembler>) -> FileOutcome {
    let start = Instant::now();
    let result = match read_document(&path) {
        Ok(data) => {
            let hint = format_hint(&path);
            match tokio::task::spawn_blocking(move || assembler.extract(&data, &hint)).await {
                Ok(extracted) => extracted.map_err(|e| explain(e).to_string()),
                Err(e) => Err(format!("extraction task failed: {e}")),
            }
        }
        Err(e) => Err(e.to_string()),
    };

    FileOutcome {
        path,
        result,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let header = summary_header();
    wtr.write_record(&header)?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &outcome.result {
            Ok(result) => wtr.write_record(summary_row(filename, result))?,
            Err(message) => {
                let mut row = vec![String::new(); header.len()];
                row[0] = filename.to_string();
                row[1] = "error".to_string();
                let last = header.len() - 1;
                row[last - 1] = outcome.processing_time_ms.to_string();
                row[last] = message.replace('\n', " ");
                wtr.write_record(&row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
