//! Configuration command
//!
//! Shows the injected theme configuration the other commands run with.

use crate::util::Session;
use alm_core::config;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde_json::Value;

fn config_value(session: &Session) -> Result<Value> {
    let config = session.load_config()?;
    serde_json::to_value(&config).context("Failed to serialize config")
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

/// List all configuration values
pub fn run_list(session: &Session) -> Result<()> {
    let config_path = session.config_path()?;
    let value = config_value(session)?;

    println!("{}", "Theme Configuration".bold());
    print!("{}: {}", "Location".dimmed(), config_path.display().dimmed());
    if !config_path.exists() {
        print!(" {}", "(not created, showing defaults)".dimmed());
    }
    println!("\n");

    if let Value::Object(sections) = &value {
        for (section, fields) in sections {
            println!("{}", format!("[{}]", section).yellow());
            if let Value::Object(fields) = fields {
                for (key, field) in fields {
                    println!("  {} = {}", key.cyan(), display(field));
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Get a single configuration value by dotted key
pub fn run_get(session: &Session, key: &str) -> Result<()> {
    let value = config_value(session)?;
    let pointer = format!("/{}", key.replace('.', "/"));

    match value.pointer(&pointer) {
        Some(Value::Object(_)) | None => anyhow::bail!(
            "Unknown config key: {}. Use 'alm config list' to see available keys.",
            key
        ),
        Some(Value::String(s)) => println!("{}", s),
        Some(other) => println!("{}", other),
    }

    Ok(())
}

/// Show the config file path and optionally create it
pub fn run_path(session: &Session, create: bool) -> Result<()> {
    let config_path = session.config_path()?;

    if create && !config_path.exists() {
        config::init_if_missing(&config_path)?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", config::example_config());
    Ok(())
}
