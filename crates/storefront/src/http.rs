//! HTTP implementation of the storefront backend
//!
//! Talks to a Shopify-style storefront:
//! - `POST cart_add_url` (form-encoded product form)
//! - `POST cart_change_url` (JSON `{line, quantity}`)
//! - `GET cart_url` and `GET cart_drawer_url`
//! - `GET predictive_search_url?q=...&resources[type]=...&resources[limit]=...`

use async_trait::async_trait;
use alm_core::config::{Routes, SearchSettings};
use alm_core::{FormData, ThemeConfig};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError};
use crate::models::{Cart, SearchResults};

/// Body of a cart change request
#[derive(Debug, Serialize)]
struct ChangeRequest {
    line: u32,
    quantity: u32,
}

/// reqwest-backed storefront client
pub struct HttpStorefront {
    client: Client,
    base_url: String,
    routes: Routes,
    search: SearchSettings,
}

impl HttpStorefront {
    /// Build a client for the backend described by `config`
    pub fn new(config: &ThemeConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.http.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.http.base_url.trim_end_matches('/').to_string(),
            routes: config.routes.clone(),
            search: config.search.clone(),
        })
    }

    /// Absolute URL for a configured route
    fn url(&self, route: &str) -> String {
        if route.starts_with("http://") || route.starts_with("https://") {
            route.to_string()
        } else if route.starts_with('/') {
            format!("{}{}", self.base_url, route)
        } else {
            format!("{}/{}", self.base_url, route)
        }
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StorefrontError::Timeout {
                    url: url.to_string(),
                }
            } else {
                StorefrontError::Network(e)
            }
        })?;

        let status = response.status();
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            return Err(StorefrontError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, url: &str, response: Response) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StorefrontError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefront {
    async fn add_line(&self, form: &FormData) -> Result<serde_json::Value> {
        let url = self.url(&self.routes.cart_add_url);
        debug!("Adding line with {} form fields", form.fields().len());

        let request = self.client.post(&url).form(form.fields());
        let response = self.send(&url, request).await?;
        self.json(&url, response).await
    }

    async fn change_line(&self, line: u32, quantity: u32) -> Result<()> {
        let url = self.url(&self.routes.cart_change_url);
        debug!("Changing line {} to quantity {}", line, quantity);

        let request = self.client.post(&url).json(&ChangeRequest { line, quantity });
        self.send(&url, request).await?;
        Ok(())
    }

    async fn fetch_cart(&self) -> Result<Cart> {
        let url = self.url(&self.routes.cart_url);
        let response = self.send(&url, self.client.get(&url)).await?;
        self.json(&url, response).await
    }

    async fn fetch_drawer(&self) -> Result<String> {
        let url = self.url(&self.routes.cart_drawer_url);
        let response = self.send(&url, self.client.get(&url)).await?;
        Ok(response.text().await?)
    }

    async fn predictive_search(&self, query: &str) -> Result<SearchResults> {
        let url = self.url(&self.routes.predictive_search_url);
        let limit = self.search.result_limit.to_string();

        let request = self.client.get(&url).query(&[
            ("q", query),
            ("resources[type]", self.search.resource_type.as_str()),
            ("resources[limit]", limit.as_str()),
        ]);

        let response = self.send(&url, request).await?;
        self.json(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront(base_url: &str) -> HttpStorefront {
        let mut config = ThemeConfig::default();
        config.http.base_url = base_url.to_string();
        HttpStorefront::new(&config).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let storefront = storefront("https://shop.example/");
        assert_eq!(storefront.url("/cart.js"), "https://shop.example/cart.js");
        assert_eq!(storefront.url("cart.js"), "https://shop.example/cart.js");
        assert_eq!(
            storefront.url("/cart?view=drawer"),
            "https://shop.example/cart?view=drawer"
        );
        assert_eq!(
            storefront.url("https://cdn.example/search"),
            "https://cdn.example/search"
        );
    }

    #[test]
    fn test_search_request_query() {
        let storefront = storefront("https://shop.example");
        let url = storefront.url(&storefront.routes.predictive_search_url);
        let request = storefront
            .client
            .get(&url)
            .query(&[("q", "wool socks"), ("resources[type]", "product"), ("resources[limit]", "6")])
            .build()
            .unwrap();

        let query = request.url().query().unwrap();
        assert!(query.starts_with("q=wool+socks"));
        assert!(query.contains("resources%5Btype%5D=product"));
        assert!(query.contains("resources%5Blimit%5D=6"));
    }

    #[test]
    fn test_change_request_body() {
        let body = serde_json::to_string(&ChangeRequest { line: 2, quantity: 0 }).unwrap();
        assert_eq!(body, r#"{"line":2,"quantity":0}"#);
    }
}
