//! Predictive search command

use crate::util::{self, Session};
use alm_core::UiEvent;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::sync::Arc;
use storefront::{Dispatcher, ProductMatch, ResultRenderer};
use ui::PageLayout;

/// Renders matches as terminal lines instead of markup
struct TextRenderer {
    money_format: String,
}

impl ResultRenderer for TextRenderer {
    fn render(&self, matches: &[ProductMatch]) -> String {
        matches
            .iter()
            .map(|product| {
                let price = product
                    .price
                    .as_ref()
                    .and_then(|price| price.format(&self.money_format).ok())
                    .unwrap_or_default();
                format!(
                    "  {} {} {}\n",
                    product.title.bold(),
                    price.green(),
                    product.url.dimmed()
                )
            })
            .collect()
    }
}

pub async fn run(session: &Session, query: &str) -> Result<()> {
    let config = session.load_config()?;
    let api = session.storefront(&config)?;
    let min_chars = config.search.min_query_chars;
    let renderer = Arc::new(TextRenderer {
        money_format: config.settings.money_format.clone(),
    });

    let mut dispatcher = Dispatcher::new(config, &PageLayout::default(), api, renderer);
    dispatcher.dispatch(UiEvent::SearchInput {
        query: query.to_string(),
    });

    let pb = util::spinner("Searching...");
    dispatcher.settle().await;
    pb.finish_and_clear();

    let panel = dispatcher.view().search;
    if query.chars().count() < min_chars {
        println!(
            "{}",
            format!("Query must be at least {} characters", min_chars).yellow()
        );
        return Ok(());
    }
    if panel.query.as_deref() != Some(query) {
        anyhow::bail!("Search for {:?} failed (see logs with ALM_LOG=debug)", query);
    }

    if panel.markup.is_empty() {
        println!("{}", "No products found".dimmed());
    } else {
        println!("{} {}\n", "Results for".bold(), query.cyan());
        print!("{}", panel.markup);
    }

    Ok(())
}
