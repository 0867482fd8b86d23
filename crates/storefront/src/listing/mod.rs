//! Incrementally-loaded product listing.
//!
//! `ProductListing` is a sans-IO state machine: it decides *what* to fetch
//! and folds results in, while a [`ListingController`] (or a test) performs
//! the actual requests. Every fetch is tagged with a [`FetchTicket`]
//! carrying a monotonic token; resetting the listing bumps the token, so a
//! response from before the reset is recognized as stale and discarded
//! instead of clobbering the fresh list.
//!
//! Pages are appended in completion order with no deduplication. An empty
//! page always terminates pagination, whatever the upstream flag claims.

pub mod normalize;
mod source;

pub use source::{ListingController, PageSource, ProxyPageSource};

use lumina_core::Product;

/// Page size requested from the upstream when the caller does not specify
/// one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Permission to run one fetch. Returned by `start_*`, consumed by
/// [`ProductListing::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    page: u32,
}

/// What the ticket holder should fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub category_id: Option<String>,
}

/// One successfully fetched, normalized page.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    pub products: Vec<Product>,
    /// Upstream-reported total, best effort.
    pub total: Option<u64>,
    /// Upstream-reported "more pages" flag.
    pub has_more: bool,
}

/// How [`ProductListing::complete`] handled a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The page (or error) was folded into the listing.
    Applied,
    /// The ticket predates a reset; nothing changed.
    Stale,
}

/// Accumulating listing state for one view.
#[derive(Debug)]
pub struct ProductListing {
    records: Vec<Product>,
    category_id: Option<String>,
    page_size: u32,
    /// Next page to request. Advances only on success.
    cursor: u32,
    total: u64,
    has_more: bool,
    in_flight: bool,
    error: Option<String>,
    /// Bumped on every reset; tickets carry the value they were issued
    /// under.
    token: u64,
}

impl Default for ProductListing {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ProductListing {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            category_id: None,
            page_size,
            cursor: 1,
            total: 0,
            has_more: true,
            in_flight: false,
            error: None,
            token: 0,
        }
    }

    /// Reset and request page 1, optionally scoped to a category.
    ///
    /// The accumulated list is cleared immediately so no stale
    /// cross-category records survive while the new page is in flight. Any
    /// fetch already running is orphaned: its ticket token no longer
    /// matches and its result will be discarded.
    pub fn start_initial(&mut self, category_id: Option<&str>) -> (FetchTicket, PageRequest) {
        self.token += 1;
        self.records.clear();
        self.category_id = category_id.map(str::to_string);
        self.cursor = 1;
        self.total = 0;
        self.has_more = true;
        self.in_flight = true;
        self.error = None;

        let ticket = FetchTicket {
            token: self.token,
            page: 1,
        };
        (ticket, self.request_for(1))
    }

    /// Request the next page, or `None` when a fetch is in flight or no
    /// more pages are available.
    pub fn start_more(&mut self) -> Option<(FetchTicket, PageRequest)> {
        if self.in_flight || !self.has_more {
            return None;
        }
        self.in_flight = true;

        let ticket = FetchTicket {
            token: self.token,
            page: self.cursor,
        };
        Some((ticket, self.request_for(self.cursor)))
    }

    /// Fold a fetch result into the listing.
    ///
    /// A ticket issued before the last reset is stale and ignored. On
    /// success, page 1 replaces the list and later pages append in
    /// completion order; the cursor advances past the fetched page. On
    /// failure the error is recorded, `has_more` is cleared so no further
    /// attempts fire, and already-loaded records are kept.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<PageResult, String>) -> Completion {
        if ticket.token != self.token {
            return Completion::Stale;
        }
        self.in_flight = false;

        match result {
            Ok(page) => {
                let empty = page.products.is_empty();
                if ticket.page == 1 {
                    self.records = page.products;
                } else {
                    self.records.extend(page.products);
                }
                self.total = page.total.unwrap_or(self.records.len() as u64);
                self.cursor = ticket.page + 1;
                // Empty page always terminates, whatever upstream said.
                self.has_more = !empty && page.has_more;
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
                self.has_more = false;
            }
        }
        Completion::Applied
    }

    #[must_use]
    pub fn records(&self) -> &[Product] {
        &self.records
    }

    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn request_for(&self, page: u32) -> PageRequest {
        PageRequest {
            page,
            limit: self.page_size,
            category_id: self.category_id.clone(),
        }
    }
}
