//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod portfolio;
pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use folio_core::{ExtractionError, FolioConfig};

/// Largest input document accepted, in bytes.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join("config.json")
}

/// Resolve the config file: `--config`, else the platform path.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration and install its extraction settings as the process default.
///
/// An explicit `--config` must exist; the platform file is optional.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<FolioConfig> {
    let path = config_path(explicit);
    let config = if explicit.is_some() || path.exists() {
        debug!("Loading configuration from {}", path.display());
        FolioConfig::from_file(&path)?
    } else {
        FolioConfig::default()
    };

    config.extraction.clone().install_default();
    Ok(config)
}

/// Read a document, rejecting missing and oversized files.
pub fn read_document(path: &Path) -> anyhow::Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_BYTES {
        anyhow::bail!(
            "{} is {:.1} MB; files larger than {} MB are not accepted",
            path.display(),
            size as f64 / (1024.0 * 1024.0),
            MAX_FILE_BYTES / (1024 * 1024)
        );
    }

    Ok(fs::read(path)?)
}

/// The file name, used as the format hint for extraction.
pub fn format_hint(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Attach the user-facing remediation advice to an extraction failure.
pub fn explain(err: ExtractionError) -> anyhow::Error {
    anyhow::anyhow!("{}\n{}", err, err.remediation())
}
