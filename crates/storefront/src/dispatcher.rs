//! Event dispatch
//!
//! Maps each [`UiEvent`] to its handler. Toggles are applied immediately,
//! scroll and search input go through their debouncers, and cart requests
//! run as background tasks so dispatch never waits on the network.

use alm_core::{ThemeConfig, UiEvent};
use debounce::Debounced;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};
use ui::{Page, PageLayout, PageView};

use crate::api::StorefrontApi;
use crate::cart::CartSync;
use crate::error::{Result, StorefrontError};
use crate::render::ResultRenderer;
use crate::search::PredictiveSearch;
use crate::{now, SharedPage};

type SearchOutcome = Result<usize>;

/// Owns the page and routes events to the component that handles them
pub struct Dispatcher {
    config: Arc<ThemeConfig>,
    page: SharedPage,
    cart: CartSync,
    scroll: Debounced<u32>,
    search: Debounced<String, SearchOutcome>,
    search_outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    /// Searches whose debounce fired
    searches_started: Arc<AtomicUsize>,
    /// Search outcomes already drained
    searches_reported: usize,
    tasks: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(
        config: ThemeConfig,
        layout: &PageLayout,
        api: Arc<dyn StorefrontApi>,
        renderer: Arc<dyn ResultRenderer>,
    ) -> Self {
        let config = Arc::new(config);
        let page: SharedPage = Arc::new(Mutex::new(Page::new(layout, &config)));

        let cart = CartSync::new(Arc::clone(&api), Arc::clone(&page), Arc::clone(&config));

        let header_page = Arc::clone(&page);
        let scroll = Debounced::wrap(
            move |offset: u32| {
                header_page.lock().header.on_scroll(offset);
                std::future::ready(())
            },
            config.timing.scroll_debounce(),
        );

        let searcher = PredictiveSearch::new(api, Arc::clone(&page), renderer, config.search.clone());
        let searches_started = Arc::new(AtomicUsize::new(0));
        let started = Arc::clone(&searches_started);
        let (search, search_outcomes) = Debounced::wrap_with_outcomes(
            move |query: String| {
                started.fetch_add(1, Ordering::SeqCst);
                // Run on its own task so a panic still yields an outcome
                let searcher = searcher.clone();
                let search = tokio::spawn(async move { searcher.search(&query).await });
                async move {
                    match search.await {
                        Ok(outcome) => outcome,
                        Err(e) => Err(StorefrontError::Task(e)),
                    }
                }
            },
            config.timing.search_debounce(),
        );

        Self {
            config,
            page,
            cart,
            scroll,
            search,
            search_outcomes,
            searches_started,
            searches_reported: 0,
            tasks: JoinSet::new(),
        }
    }

    pub fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }

    pub fn cart(&self) -> &CartSync {
        &self.cart
    }

    /// Snapshot of the page as it looks now
    pub fn view(&self) -> PageView {
        self.page.lock().view(now())
    }

    /// Handle one event
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!("Dispatching {}", event.name());
        self.drain_search_outcomes();
        self.reap_tasks();

        if event.is_escape() {
            self.page.lock().escape_pressed();
            return;
        }

        match event {
            UiEvent::PageReady => {
                info!("Page ready");
                let page = Arc::clone(&self.page);
                let delay = self.config.timing.overlay_hide_delay();
                self.tasks.spawn(async move {
                    tokio::time::sleep(delay).await;
                    page.lock().loading_overlay_hidden = true;
                });
            }
            UiEvent::MenuToggleClicked => self.page.lock().menu.toggle(),
            UiEvent::MenuOverlayClicked => self.page.lock().menu.overlay_clicked(),
            UiEvent::KeyPressed { key } => debug!("Ignoring key {}", key),
            UiEvent::ModalOpenClicked { modal_id } => {
                self.page.lock().modals.open(&modal_id);
            }
            UiEvent::ModalCloseClicked => self.page.lock().modals.close_all(),
            UiEvent::DrawerCloseClicked => self.page.lock().drawer.close(),
            UiEvent::AddToCartClicked { form } => {
                {
                    let mut page = self.page.lock();
                    if page.add_button.disabled {
                        debug!("Add button busy, ignoring click");
                        return;
                    }
                    page.add_button.begin(&self.config.strings.adding);
                }
                let cart = self.cart.clone();
                self.tasks.spawn(async move {
                    let _ = cart.add_item(form).await;
                });
            }
            UiEvent::QuantityChanged { line, value } => {
                let cart = self.cart.clone();
                self.tasks.spawn(async move {
                    let _ = cart.update_quantity(line, &value).await;
                });
            }
            UiEvent::RemoveClicked { line } => {
                let cart = self.cart.clone();
                self.tasks.spawn(async move {
                    let _ = cart.remove_item(line).await;
                });
            }
            UiEvent::Scrolled { offset } => self.scroll.call(offset),
            UiEvent::SearchInput { query } => self.search.call(query),
        }
    }

    /// Background requests still tracked (running or finished but not yet reaped)
    pub fn background_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until no debounce is pending and every started request finished
    pub async fn settle(&mut self) {
        loop {
            if self.scroll.is_pending() || self.search.is_pending() {
                let wait = self.scroll.window().max(self.search.window());
                tokio::time::sleep(wait).await;
                continue;
            }

            if self.searches_reported < self.searches_started.load(Ordering::SeqCst) {
                match self.search_outcomes.recv().await {
                    Some(outcome) => self.report_search(outcome),
                    None => break,
                }
                continue;
            }

            match self.tasks.join_next().await {
                Some(result) => Self::report_task(result),
                None => break,
            }
        }
    }

    /// Drop pending debounced work and abort in-flight requests
    pub fn shutdown(&mut self) {
        self.scroll.cancel();
        self.search.cancel();
        self.tasks.abort_all();
    }

    /// Drop finished background tasks so a long-lived page does not keep them
    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            Self::report_task(result);
        }
    }

    fn report_task(result: std::result::Result<(), JoinError>) {
        if let Err(e) = result {
            warn!("Background task failed: {}", e);
        }
    }

    fn drain_search_outcomes(&mut self) {
        while let Ok(outcome) = self.search_outcomes.try_recv() {
            self.report_search(outcome);
        }
    }

    fn report_search(&mut self, outcome: SearchOutcome) {
        self.searches_reported += 1;
        match outcome {
            Ok(count) => debug!("Search showed {} results", count),
            Err(e) => error!("Search error: {}", e),
        }
    }
}
