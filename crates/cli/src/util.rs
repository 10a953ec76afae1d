//! Shared helpers for commands

use alm_core::config;
use alm_core::ThemeConfig;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storefront::HttpStorefront;
use ui::{PageView, ToastKind};

/// Global options every command resolves its config from
pub struct Session {
    config_path: Option<PathBuf>,
    base_url: Option<String>,
}

impl Session {
    pub fn new(config_path: Option<PathBuf>, base_url: Option<String>) -> Self {
        Self { config_path, base_url }
    }

    /// `--config` if given, otherwise the default location
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => config::config_file_path().context("Could not determine config file path"),
        }
    }

    /// Load config with command-line overrides applied
    pub fn load_config(&self) -> Result<ThemeConfig> {
        let path = self.config_path()?;
        let mut config = config::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        if let Some(base_url) = &self.base_url {
            config.http.base_url = base_url.clone();
            config.validate().context("Invalid --base-url")?;
        }

        Ok(config)
    }

    pub fn storefront(&self, config: &ThemeConfig) -> Result<Arc<HttpStorefront>> {
        let api = HttpStorefront::new(config).context("Failed to build HTTP client")?;
        Ok(Arc::new(api))
    }
}

/// Spinner shown while requests are in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

/// Print the toasts a page is showing; returns true if any is an error
pub fn print_toasts(view: &PageView) -> bool {
    let mut failed = false;
    for toast in &view.toasts {
        match toast.kind {
            ToastKind::Success => println!("{} {}", "✓".green(), toast.message),
            ToastKind::Error => {
                failed = true;
                println!("{} {}", "✗".red(), toast.message.red());
            }
        }
    }
    failed
}
