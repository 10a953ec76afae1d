//! In-memory storefront backend for tests

use alm_core::FormData;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use storefront::{Cart, CartItem, Price, ProductMatch, Result, SearchResults, StorefrontApi, StorefrontError};

/// A cart line held by the fake backend
#[derive(Debug, Clone)]
pub struct Line {
    pub title: String,
    pub quantity: u32,
    pub price: i64,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub lines: Vec<Line>,
    pub catalog: Vec<ProductMatch>,
    /// Every request, in order (`add:<id>`, `change:<line>:<qty>`, `cart`, `drawer`, `search:<q>`)
    pub calls: Vec<String>,
    pub fail_add: bool,
    pub fail_cart: bool,
    pub fail_search: bool,
    /// Search handler panics instead of answering
    pub panic_search: bool,
}

/// Scriptable backend answering after a fixed latency
pub struct FakeStorefront {
    pub state: Mutex<FakeState>,
    latency: Duration,
}

impl FakeStorefront {
    pub fn new() -> Self {
        let catalog = vec![
            product("Boots", "49.00"),
            product("Boot socks", "12.50"),
            product("Wool hat", "25.00"),
        ];
        Self {
            state: Mutex::new(FakeState {
                catalog,
                ..FakeState::default()
            }),
            latency: Duration::from_millis(40),
        }
    }

    pub fn with_lines(self, lines: &[(&str, u32)]) -> Self {
        self.state.lock().lines = lines
            .iter()
            .map(|(title, quantity)| Line {
                title: title.to_string(),
                quantity: *quantity,
                price: 1000,
            })
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with(prefix)).collect()
    }

    fn record(&self, call: String) {
        self.state.lock().calls.push(call);
    }

    fn status(url: &str, status: u16) -> StorefrontError {
        StorefrontError::Status {
            url: url.to_string(),
            status,
        }
    }
}

fn product(title: &str, price: &str) -> ProductMatch {
    ProductMatch {
        title: title.to_string(),
        url: format!("/products/{}", title.to_lowercase().replace(' ', "-")),
        price: Some(Price::Text(price.to_string())),
        vendor: Some("Almliebe".to_string()),
        image: None,
    }
}

#[async_trait]
impl StorefrontApi for FakeStorefront {
    async fn add_line(&self, form: &FormData) -> Result<serde_json::Value> {
        let id = form.get("id").unwrap_or_default().to_string();
        self.record(format!("add:{}", id));
        tokio::time::sleep(self.latency).await;

        let mut state = self.state.lock();
        if state.fail_add {
            return Err(Self::status("/cart/add.js", 422));
        }

        let quantity = form.get("quantity").and_then(|q| q.parse().ok()).unwrap_or(1);
        let title = format!("Variant {}", id);
        state.lines.push(Line {
            title: title.clone(),
            quantity,
            price: 4900,
        });
        Ok(serde_json::json!({ "id": id, "title": title, "quantity": quantity }))
    }

    async fn change_line(&self, line: u32, quantity: u32) -> Result<()> {
        self.record(format!("change:{}:{}", line, quantity));
        tokio::time::sleep(self.latency).await;

        let mut state = self.state.lock();
        let index = line as usize;
        if index == 0 || index > state.lines.len() {
            return Err(Self::status("/cart/change.js", 400));
        }
        if quantity == 0 {
            state.lines.remove(index - 1);
        } else {
            state.lines[index - 1].quantity = quantity;
        }
        Ok(())
    }

    async fn fetch_cart(&self) -> Result<Cart> {
        self.record("cart".to_string());
        tokio::time::sleep(self.latency).await;

        let state = self.state.lock();
        if state.fail_cart {
            return Err(Self::status("/cart.js", 500));
        }

        let items: Vec<CartItem> = state
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| CartItem {
                key: format!("{}:key", i + 1),
                title: line.title.clone(),
                quantity: line.quantity,
                variant_id: None,
                final_line_price: line.price * line.quantity as i64,
            })
            .collect();

        Ok(Cart {
            item_count: items.iter().map(|item| item.quantity).sum(),
            total_price: items.iter().map(|item| item.final_line_price).sum(),
            currency: Some("EUR".to_string()),
            items,
        })
    }

    async fn fetch_drawer(&self) -> Result<String> {
        self.record("drawer".to_string());
        tokio::time::sleep(self.latency).await;

        let state = self.state.lock();
        let items: String = state
            .lines
            .iter()
            .map(|line| format!("<li>{} x{}</li>", line.title, line.quantity))
            .collect();
        Ok(format!(
            "<html><body><div data-cart-drawer><div data-cart-drawer-content><ul>{}</ul></div></div></body></html>",
            items
        ))
    }

    async fn predictive_search(&self, query: &str) -> Result<SearchResults> {
        self.record(format!("search:{}", query));
        tokio::time::sleep(self.latency).await;

        if self.state.lock().panic_search {
            panic!("search backend crashed");
        }

        let state = self.state.lock();
        if state.fail_search {
            return Err(Self::status("/search/suggest.json", 503));
        }

        let needle = query.to_lowercase();
        let products = state
            .catalog
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(SearchResults::from_products(products))
    }
}
