//! Paged product list controller.
//!
//! Owns the category filter, the requested page and the last page of products
//! that loaded successfully. Every change that needs new data hands back a
//! [`Ticket`]; the caller runs the request and gives the result back to
//! [`PagedListController::apply`]. Tickets carry a sequence number so a slow
//! response for an older request can never overwrite a newer one.

use std::fmt;

use bakery_api::types::{CategoryID, Page, Paging, Product};
use bakery_api::{Client, ProductQuery, Query};

use crate::config::DEFAULT_PAGE_SIZE;

/// Message shown when a page of products fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load products. Please try again.";

/// Where the controller is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// The latest request has not resolved.
    Loading,
    Loaded,
    Failed,
}

/// A pending product list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    query: ProductQuery,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ProductQuery {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub struct PagedListController {
    page_size: i64,
    category_id: Option<CategoryID>,
    /// Requested page, 1-indexed.
    page: i64,
    /// Pagination of the last page that loaded.
    paging: Paging,
    items: Vec<Product>,
    state: LoadState,
    error: Option<String>,
    /// Sequence number of the most recently issued ticket.
    latest_seq: u64,
}

impl Default for PagedListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PagedListController {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size: page_size.max(1),
            category_id: None,
            page: 1,
            paging: Paging::default(),
            items: Vec::new(),
            state: LoadState::Idle,
            error: None,
            latest_seq: 0,
        }
    }

    /// Starts with a category already selected, e.g. from a `?category=` link.
    pub fn with_category(mut self, category_id: Option<CategoryID>) -> Self {
        self.category_id = category_id.filter(|id| *id > 0);
        self
    }

    // -- Accessors --

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn paging(&self) -> &Paging {
        &self.paging
    }

    pub fn current_page(&self) -> i64 {
        self.page
    }

    pub fn total_pages(&self) -> i64 {
        self.paging.total_pages
    }

    pub fn total_items(&self) -> i64 {
        self.paging.total_items
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn category_id(&self) -> Option<CategoryID> {
        self.category_id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// User-facing message for the last failed load, cleared on the next request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once a load has finished without any products.
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.state != LoadState::Idle && self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.paging.total_pages
    }

    // -- Transitions --

    /// Re-requests the current page and filter.
    pub fn refresh(&mut self) -> Ticket {
        self.issue()
    }

    /// Changes the category filter and goes back to page 1.
    ///
    /// Returns `None` when the filter is unchanged and page 1 is already loaded
    /// or loading. Ids of 0 or below clear the filter.
    pub fn set_category(&mut self, category_id: Option<CategoryID>) -> Option<Ticket> {
        let category_id = category_id.filter(|id| *id > 0);
        if category_id == self.category_id && self.page == 1 && self.is_settled() {
            return None;
        }
        self.category_id = category_id;
        self.page = 1;
        Some(self.issue())
    }

    /// Moves one page back. No-op on the first page.
    pub fn previous_page(&mut self) -> Option<Ticket> {
        if !self.has_previous() {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    /// Moves one page forward. No-op on the last page.
    pub fn next_page(&mut self) -> Option<Ticket> {
        if !self.has_next() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Jumps to `page`, clamped to the known page range. No-op if that page is
    /// already loaded or loading; after a failure it retries.
    ///
    /// Before the first load the page count is unknown, so only the lower
    /// bound applies.
    pub fn go_to_page(&mut self, page: i64) -> Option<Ticket> {
        let upper = match self.state {
            LoadState::Idle => i64::MAX,
            _ => self.paging.total_pages.max(1),
        };
        let page = page.clamp(1, upper);
        if page == self.page && self.is_settled() {
            return None;
        }
        self.page = page;
        Some(self.issue())
    }

    /// True while the current page and filter are loaded or loading. Idle and
    /// failed controllers always re-request.
    fn is_settled(&self) -> bool {
        matches!(self.state, LoadState::Loading | LoadState::Loaded)
    }

    fn issue(&mut self) -> Ticket {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        self.error = None;
        Ticket {
            seq: self.latest_seq,
            query: ProductQuery::default()
                .with_page(self.page)
                .with_limit(self.page_size)
                .with_category(self.category_id),
        }
    }

    /// Applies the outcome of a ticket's request.
    ///
    /// Returns `false` and leaves every field untouched when a newer ticket has
    /// been issued since. On error the item list and pagination are kept and
    /// only the message and loading state change.
    pub fn apply<E: fmt::Display>(&mut self, ticket: Ticket, result: Result<Page<Product>, E>) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::warn!(
                "Discarding stale product page (request {}, latest {})",
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.paging = page.paging.clamped();
                self.page = self.paging.page;
                self.items = page.items;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!("Failed to load products: {}", e);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.state = LoadState::Failed;
            }
        }
        true
    }

    /// Runs a ticket against the API and applies the result.
    pub async fn load(&mut self, client: &Client, ticket: Ticket) -> bool {
        let result = client.get_products(ticket.query()).await;
        self.apply(ticket, result)
    }

    /// Runs `ticket` if there is one. Returns whether state changed.
    pub async fn load_if(&mut self, client: &Client, ticket: Option<Ticket>) -> bool {
        match ticket {
            Some(ticket) => self.load(client, ticket).await,
            None => false,
        }
    }
}
