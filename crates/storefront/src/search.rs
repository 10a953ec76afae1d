//! Predictive search

use alm_core::config::SearchSettings;
use std::sync::Arc;
use tracing::debug;

use crate::api::StorefrontApi;
use crate::error::Result;
use crate::render::ResultRenderer;
use crate::SharedPage;

#[derive(Clone)]
pub struct PredictiveSearch {
    api: Arc<dyn StorefrontApi>,
    page: SharedPage,
    renderer: Arc<dyn ResultRenderer>,
    settings: SearchSettings,
}

impl PredictiveSearch {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        page: SharedPage,
        renderer: Arc<dyn ResultRenderer>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            api,
            page,
            renderer,
            settings,
        }
    }

    /// Search for `query` and splice the rendered matches into the page
    ///
    /// Queries below the minimum length clear the results without touching
    /// the network. Returns the number of matches shown.
    pub async fn search(&self, query: &str) -> Result<usize> {
        if query.chars().count() < self.settings.min_query_chars {
            debug!("Query too short, clearing results");
            self.page.lock().search.clear();
            return Ok(0);
        }

        let results = self.api.predictive_search(query).await?;
        let products = results.products();
        debug!("Search for {:?} returned {} products", query, products.len());

        let markup = self.renderer.render(products);
        self.page.lock().search.show(query, markup);
        Ok(products.len())
    }
}
