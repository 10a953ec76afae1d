//! Cart commands

use crate::util::{self, Session};
use alm_core::{format_money, FormData, UiEvent};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::sync::Arc;
use storefront::{Dispatcher, ListRenderer, StorefrontApi};
use ui::PageLayout;

/// Show the cart lines and total
pub async fn run_show(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let api = session.storefront(&config)?;
    let money_format = &config.settings.money_format;

    let pb = util::spinner("Loading cart...");
    let cart = api.fetch_cart().await;
    pb.finish_and_clear();
    let cart = cart.context("Failed to load cart")?;

    println!("{}", "Cart".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if cart.items.is_empty() {
        println!("{}", "Your cart is empty".dimmed());
        return Ok(());
    }

    for (i, item) in cart.items.iter().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            item.title.bold(),
            format!("x{}", item.quantity).dimmed(),
            format_money(item.final_line_price, money_format)?.green()
        );
    }

    println!();
    println!("Items:  {}", cart.item_count.to_string().cyan());
    println!("Total:  {}", format_money(cart.total_price, money_format)?.green().bold());
    if let Some(currency) = &cart.currency {
        println!("        {}", currency.dimmed());
    }

    Ok(())
}

/// Parse `key=value` into a line item property field
fn property_field(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Invalid property {:?}, expected key=value", raw))?;
    Ok((format!("properties[{}]", key.trim()), value.to_string()))
}

/// Build a dispatcher over the HTTP backend
fn dispatcher(session: &Session) -> Result<(Dispatcher, String)> {
    let config = session.load_config()?;
    let api = session.storefront(&config)?;
    let busy = config.strings.adding.clone();
    let renderer = Arc::new(ListRenderer::new(config.settings.money_format.clone()));
    Ok((Dispatcher::new(config, &PageLayout::default(), api, renderer), busy))
}

/// Run one cart event to completion and report its toasts
async fn run_event(mut dispatcher: Dispatcher, event: UiEvent, busy: &str) -> Result<()> {
    dispatcher.dispatch(event);

    let pb = util::spinner(busy);
    dispatcher.settle().await;
    pb.finish_and_clear();

    let view = dispatcher.view();
    if util::print_toasts(&view) {
        anyhow::bail!("Cart update failed (see logs with ALM_LOG=debug)");
    }
    println!("{} {}", "Items in cart:".dimmed(), view.cart_count.to_string().cyan());
    Ok(())
}

/// Add a variant to the cart
pub async fn run_add(session: &Session, variant_id: &str, quantity: u32, properties: &[String]) -> Result<()> {
    let mut form = FormData::new();
    form.append("id", variant_id).append("quantity", quantity.to_string());
    for raw in properties {
        let (key, value) = property_field(raw)?;
        form.append(key, value);
    }

    let (dispatcher, busy) = dispatcher(session)?;
    run_event(dispatcher, UiEvent::AddToCartClicked { form }, &busy).await
}

/// Set the quantity of a cart line
pub async fn run_change(session: &Session, line: u32, quantity: &str) -> Result<()> {
    let (dispatcher, _) = dispatcher(session)?;
    let event = UiEvent::QuantityChanged {
        line,
        value: quantity.to_string(),
    };
    run_event(dispatcher, event, "Updating cart...").await?;
    println!("{} Line {} set to {}", "✓".green(), line, quantity.trim());
    Ok(())
}

/// Remove a cart line
pub async fn run_remove(session: &Session, line: u32) -> Result<()> {
    let (dispatcher, _) = dispatcher(session)?;
    run_event(dispatcher, UiEvent::RemoveClicked { line }, "Removing item...").await?;
    println!("{} Removed line {}", "✓".green(), line);
    Ok(())
}
