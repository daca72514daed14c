//! Config command - inspect and edit the JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use folio_core::FolioConfig;

use super::config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value by dotted key
    Get {
        /// Configuration key (e.g., "parsing.limits.max_projects")
        key: String,
    },

    /// Change one value by dotted key
    Set {
        /// Configuration key
        key: String,
        /// New value, parsed as JSON when possible
        value: String,
    },

    /// Show the configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Write to this path instead of the configuration path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(explicit);
    match args.command {
        ConfigCommand::Show => show(&path),
        ConfigCommand::Init(init_args) => init(init_args, &path),
        ConfigCommand::Get { key } => get(&path, &key),
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<FolioConfig> {
    if path.exists() {
        Ok(FolioConfig::from_file(path)?)
    } else {
        Ok(FolioConfig::default())
    }
}

fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }
    let config = read_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    FolioConfig::default().save(&output_path)?;
    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );
    Ok(())
}

fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(path)?)?;
    let value = lookup(&json, key)?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(read_or_default(path)?)?;

    // Bare words like `executive` are taken as strings.
    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let slot = lookup_mut(&mut json, key)?;
    if slot.is_object() {
        anyhow::bail!("{} is a section; set one of its keys instead", key);
    }
    *slot = value.clone();

    let config: FolioConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?
    );
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'folio config init' to create a configuration file.");
    }
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

fn lookup_mut<'a>(json: &'a mut Value, key: &str) -> anyhow::Result<&'a mut Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(FolioConfig::default()).unwrap();
        assert_eq!(lookup(&json, "parsing.limits.max_projects").unwrap(), &Value::from(6));
        assert_eq!(
            lookup(&json, "portfolio.default_template").unwrap(),
            &Value::from("modern")
        );
        assert!(lookup(&json, "parsing.nope").is_err());
    }

    #[test]
    fn test_lookup_mut_rejects_unknown_key() {
        let mut json = serde_json::to_value(FolioConfig::default()).unwrap();
        *lookup_mut(&mut json, "extraction.min_text_length").unwrap() = Value::from(50);
        let config: FolioConfig = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(config.extraction.min_text_length, 50);

        assert!(lookup_mut(&mut json, "extraction.unknown").is_err());
    }
}
