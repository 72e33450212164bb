//! Search selection controller with dependency injection
//!
//! All operations take `&mut self` and are meant to be called one at a time
//! from the shell's event loop. Provider calls run on spawned tasks and
//! report back over a channel; the shell pumps those reports in with
//! `poll_responses`, `next_response` or `settle`.
//!
//! Every dispatched search opens a new epoch. A response is applied only
//! while its epoch and text are still current, so a slow answer for an old
//! search text can never land in the window.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use shared::{
    CatalogFailure, CatalogPage, Product, ProductId, SearchQuery, SelectedProduct, SessionId, Variant, VariantRef,
    session_debug, session_info, session_warn,
};
use crate::core::{ResultWindow, SelectionState, Throttle};
use crate::error::{PickerError, PickerResult};
use crate::traits::{CatalogSearchProvider, SelectionConsumer};
use crate::types::{
    PageDispatch, PickerConfig, PickerStatus, ProductToggle, ResponseOutcome, SearchDispatch, VariantToggle,
};

/// One provider answer, tagged with the epoch it was requested under
#[derive(Debug)]
struct PageResponse {
    epoch: u64,
    query: SearchQuery,
    result: Result<CatalogPage, CatalogFailure>,
}

#[derive(Debug)]
struct InFlight {
    query: SearchQuery,
    task: JoinHandle<()>,
}

enum Wake {
    Response(Option<PageResponse>),
    TaskEnded(Result<(), JoinError>),
}

/// Live-searchable, paginated, multi-select catalog browser
pub struct SearchSelectionController<P>
where
    P: CatalogSearchProvider + 'static,
{
    session: SessionId,
    provider: Arc<P>,
    config: PickerConfig,

    // Current search
    query_text: String,
    epoch: u64,
    throttle: Throttle,
    pending_text: Option<String>,

    // Fetched data and user choices
    window: ResultWindow,
    selection: SelectionState,

    // Request bookkeeping
    in_flight: Option<InFlight>,
    failed: Option<SearchQuery>,
    last_error: Option<PickerError>,
    response_tx: mpsc::UnboundedSender<PageResponse>,
    response_rx: mpsc::UnboundedReceiver<PageResponse>,
}

impl<P> SearchSelectionController<P>
where
    P: CatalogSearchProvider + 'static,
{
    /// Create a controller. Nothing is fetched until `open` or a search.
    pub fn new(provider: P, config: PickerConfig) -> PickerResult<Self> {
        config.validate()?;
        let (response_tx, response_rx) = mpsc::unbounded_channel();

        Ok(Self {
            session: SessionId::new(),
            provider: Arc::new(provider),
            throttle: Throttle::new(config.throttle_interval),
            config,
            query_text: String::new(),
            epoch: 0,
            pending_text: None,
            window: ResultWindow::new(),
            selection: SelectionState::new(),
            in_flight: None,
            failed: None,
            last_error: None,
            response_tx,
            response_rx,
        })
    }

    /// Fetch the first page of the unfiltered catalog. Does not arm the
    /// search throttle.
    pub fn open(&mut self) -> SearchDispatch {
        session_info!(self.session, "📋 Opening picker (page size {})", self.config.page_size);
        let epoch = self.begin_epoch(String::new());
        SearchDispatch::Dispatched { epoch }
    }

    /// Start a new search for `text` at page 0. At most one search goes out
    /// per throttle interval; calls inside the interval are dropped.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> SearchDispatch {
        let text = text.into();
        if !self.throttle.try_acquire() {
            session_debug!(
                self.session,
                "Search for '{}' throttled ({:?} left)",
                text,
                self.throttle.remaining()
            );
            self.pending_text = Some(text);
            return SearchDispatch::Throttled;
        }

        self.pending_text = None;
        let epoch = self.begin_epoch(text);
        SearchDispatch::Dispatched { epoch }
    }

    /// Pull the next page for the current text. If the window does not hold
    /// results for the current text yet, page 0 is requested again.
    pub fn load_next_page(&mut self) -> PageDispatch {
        if self.in_flight.is_some() {
            return PageDispatch::InFlight;
        }

        let query = if self.window.belongs_to(&self.query_text) {
            match self.window.next_query(self.config.page_size) {
                Some(query) => query,
                None => return PageDispatch::Exhausted,
            }
        } else {
            SearchQuery::new(self.query_text.clone(), 0, self.config.page_size)
        };

        let page = query.page;
        self.dispatch(query);
        PageDispatch::Dispatched { epoch: self.epoch, page }
    }

    /// Re-issue the request that failed last
    pub fn retry(&mut self) -> PageDispatch {
        if self.in_flight.is_some() {
            return PageDispatch::InFlight;
        }
        let Some(query) = self.failed.clone() else {
            return PageDispatch::Idle;
        };

        session_info!(self.session, "🔄 Retrying '{}' page {}", query.text, query.page);
        let page = query.page;
        self.dispatch(query);
        PageDispatch::Dispatched { epoch: self.epoch, page }
    }

    pub fn toggle_product_selected(&mut self, product_id: &ProductId) -> PickerResult<ProductToggle> {
        // Deselecting works even after the product scrolled out with a new search
        if self.selection.remove(product_id) {
            return Ok(ProductToggle::Deselected);
        }
        let product = self
            .window
            .get(product_id)
            .ok_or_else(|| PickerError::UnknownProduct { id: product_id.clone() })?;
        Ok(self.selection.toggle_product(product))
    }

    /// Flip one variant of a selected product; ignored when the product is
    /// not selected. Never deselects the product itself.
    pub fn toggle_variant_selected(&mut self, product_id: &ProductId, variant: &VariantRef) -> VariantToggle {
        self.selection.toggle_variant(product_id, variant)
    }

    /// Owned copy of the selection, in the order products were first selected
    pub fn confirm_selection(&self) -> Vec<SelectedProduct> {
        self.selection.snapshot()
    }

    /// Hand the selection to `consumer` and close the picker
    pub fn confirm<C>(self, consumer: &mut C)
    where
        C: SelectionConsumer + ?Sized,
    {
        let selection = self.confirm_selection();
        session_info!(self.session, "✅ Confirmed {} products", selection.len());
        consumer.on_confirm(selection);
    }

    /// Notify `consumer` and close the picker, discarding the selection
    pub fn cancel<C>(self, consumer: &mut C)
    where
        C: SelectionConsumer + ?Sized,
    {
        session_info!(self.session, "🛑 Picker cancelled");
        consumer.on_cancel();
    }

    /// Close the picker without telling anyone
    pub fn discard(self) {
        session_debug!(self.session, "Picker discarded");
    }

    /// Apply every response that has already arrived, without waiting
    pub fn poll_responses(&mut self) -> Vec<ResponseOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(response) = self.response_rx.try_recv() {
            outcomes.push(self.apply(response));
        }
        outcomes
    }

    /// Wait for the next response and apply it. Returns `None` when nothing
    /// is pending.
    pub async fn next_response(&mut self) -> Option<ResponseOutcome> {
        if let Ok(response) = self.response_rx.try_recv() {
            return Some(self.apply(response));
        }

        let wake = {
            let in_flight = self.in_flight.as_mut()?;
            let rx = &mut self.response_rx;
            tokio::select! {
                biased;
                response = rx.recv() => Wake::Response(response),
                joined = &mut in_flight.task => Wake::TaskEnded(joined),
            }
        };

        match wake {
            Wake::Response(response) => response.map(|response| self.apply(response)),
            Wake::TaskEnded(joined) => {
                // The handle is spent; it must not be polled again
                let finished = self.in_flight.take()?;
                if let Ok(response) = self.response_rx.try_recv() {
                    return Some(self.apply(response));
                }
                let reason = match joined {
                    Ok(()) => CatalogFailure::Network("provider task ended without a response".to_string()),
                    Err(e) => CatalogFailure::Network(format!("provider task failed: {e}")),
                };
                Some(self.record_failure(finished.query, reason))
            }
        }
    }

    /// Apply responses until no request is in flight
    pub async fn settle(&mut self) -> Vec<ResponseOutcome> {
        let mut outcomes = self.poll_responses();
        while self.in_flight.is_some() {
            match self.next_response().await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Latest text dropped by the throttle, if no search went out since
    pub fn pending_search_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    pub fn results(&self) -> &[Product] {
        self.window.products()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.window.belongs_to(&self.query_text) && self.window.is_exhausted()
    }

    pub fn last_error(&self) -> Option<&PickerError> {
        self.last_error.as_ref()
    }

    pub fn is_selected(&self, product_id: &ProductId) -> bool {
        self.selection.contains(product_id)
    }

    pub fn is_variant_selected(&self, product_id: &ProductId, variant: &VariantRef) -> bool {
        self.selection.is_variant_selected(product_id, variant)
    }

    pub fn selected_variants(&self, product_id: &ProductId) -> Option<Vec<Variant>> {
        self.selection.variants(product_id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn status(&self) -> PickerStatus {
        if self.in_flight.is_some() {
            PickerStatus::Loading
        } else if self.last_error.is_some() {
            PickerStatus::Failed
        } else if self.window.text().is_none() {
            PickerStatus::Idle
        } else if self.window.is_empty() && self.window.is_exhausted() {
            PickerStatus::NoResults
        } else if self.window.is_exhausted() {
            PickerStatus::Exhausted
        } else {
            PickerStatus::Ready
        }
    }

    /// Supersede whatever is in flight and search `text` from page 0
    fn begin_epoch(&mut self, text: String) -> u64 {
        self.epoch += 1;
        self.query_text = text;
        self.failed = None;
        if let Some(previous) = self.in_flight.take() {
            previous.task.abort();
        }

        session_info!(self.session, "🔍 Searching '{}' (epoch {})", self.query_text, self.epoch);
        self.dispatch(SearchQuery::new(self.query_text.clone(), 0, self.config.page_size));
        self.epoch
    }

    fn dispatch(&mut self, query: SearchQuery) {
        let provider = Arc::clone(&self.provider);
        let tx = self.response_tx.clone();
        let epoch = self.epoch;
        let timeout = self.config.request_timeout;
        let request = query.clone();

        session_debug!(self.session, "Requesting '{}' page {} (epoch {})", query.text, query.page, epoch);
        let task = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, provider.search(&request)).await {
                Ok(result) => result,
                Err(_) => Err(CatalogFailure::Timeout),
            };
            // Send fails only once the controller is gone
            let _ = tx.send(PageResponse {
                epoch,
                query: request,
                result,
            });
        });

        self.in_flight = Some(InFlight { query, task });
    }

    fn apply(&mut self, response: PageResponse) -> ResponseOutcome {
        if response.epoch != self.epoch || response.query.text != self.query_text {
            session_debug!(
                self.session,
                "Discarding stale response for '{}' (epoch {}, current {})",
                response.query.text,
                response.epoch,
                self.epoch
            );
            return ResponseOutcome::Stale;
        }

        if self.in_flight.as_ref().is_some_and(|f| f.query == response.query) {
            self.in_flight = None;
        }

        match response.result {
            Ok(page) => {
                let returned = page.returned();
                let added = self.window.apply_page(&response.query, page);
                self.failed = None;
                self.last_error = None;
                session_debug!(
                    self.session,
                    "Applied '{}' page {}: {} returned, {} new, {} total",
                    response.query.text,
                    response.query.page,
                    returned,
                    added,
                    self.window.len()
                );
                ResponseOutcome::Applied {
                    page: response.query.page,
                    added,
                }
            }
            Err(reason) => self.record_failure(response.query, reason),
        }
    }

    fn record_failure(&mut self, query: SearchQuery, reason: CatalogFailure) -> ResponseOutcome {
        let error = PickerError::ProviderUnavailable { reason };
        session_warn!(self.session, "❌ Search '{}' page {} failed: {}", query.text, query.page, error);
        self.failed = Some(query);
        self.last_error = Some(error.clone());
        ResponseOutcome::Failed(error)
    }
}

impl<P> Drop for SearchSelectionController<P>
where
    P: CatalogSearchProvider + 'static,
{
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
        self.throttle.reset();
    }
}
