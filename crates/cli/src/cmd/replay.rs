//! Replay a recorded sequence of UI events
//!
//! Each non-empty line of the input is a JSON event, optionally delayed
//! relative to the previous one:
//!
//! ```text
//! {"type": "search_input", "query": "bo"}
//! {"type": "search_input", "query": "boots", "delay_ms": 120}
//! ```
//!
//! Lines starting with `#` are comments. After the last event the page is
//! settled and its final state printed as JSON.

use crate::util::Session;
use alm_core::UiEvent;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use storefront::{Dispatcher, ListRenderer};
use tracing::debug;
use ui::PageLayout;

#[derive(Debug, Deserialize)]
struct ReplayStep {
    /// Wait before dispatching
    #[serde(default)]
    delay_ms: u64,
    #[serde(flatten)]
    event: UiEvent,
}

fn parse_steps(text: &str) -> Result<Vec<ReplayStep>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid event on line {}", i + 1))
        })
        .collect()
}

pub async fn run(session: &Session, file: &Path, modal_ids: Vec<String>, no_drawer: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read event file {}", file.display()))?;
    let steps = parse_steps(&text)?;

    let config = session.load_config()?;
    let api = session.storefront(&config)?;
    let renderer = Arc::new(ListRenderer::new(config.settings.money_format.clone()));
    let layout = PageLayout {
        cart_drawer: !no_drawer,
        modal_ids,
        ..PageLayout::default()
    };

    let mut dispatcher = Dispatcher::new(config, &layout, api, renderer);
    for step in steps {
        if step.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
        }
        debug!("Replaying {}", step.event.name());
        dispatcher.dispatch(step.event);
    }
    dispatcher.settle().await;

    let view = dispatcher.view();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
