//! Page sources and the async listing controller.

use tracing::{debug, instrument};

use crate::currency::ExchangeRate;
use crate::listing::normalize::normalize_record;
use crate::listing::{Completion, PageRequest, PageResult, ProductListing};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Something that can fetch one normalized listing page.
pub trait PageSource {
    fn fetch(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<PageResult, UpstreamError>> + Send;
}

/// Page source backed by the upstream listing endpoint, applying the
/// response's exchange rate and record normalization.
#[derive(Clone)]
pub struct ProxyPageSource {
    upstream: UpstreamClient,
}

impl ProxyPageSource {
    #[must_use]
    pub const fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

impl PageSource for ProxyPageSource {
    async fn fetch(&self, request: &PageRequest) -> Result<PageResult, UpstreamError> {
        let envelope = self
            .upstream
            .product_page(request.page, request.limit, request.category_id.as_deref())
            .await?;

        let rate = ExchangeRate::from_envelope(envelope.exchange_rate.as_ref());
        let products = envelope
            .data
            .iter()
            .map(|record| normalize_record(record, rate.as_ref()))
            .collect::<Vec<_>>();

        let pagination = envelope.pagination.unwrap_or_default();
        // With no upstream flag, a full page is taken to mean more exist.
        let has_more = pagination
            .has_next_page
            .unwrap_or(products.len() as u32 >= request.limit);

        Ok(PageResult {
            products,
            total: pagination.total.and_then(|t| u64::try_from(t).ok()),
            has_more,
        })
    }
}

/// Drives a [`ProductListing`] against a [`PageSource`].
///
/// Thin async shell around the state machine: it requests tickets, runs
/// the fetch, and folds the result back in. Errors are folded into the
/// listing state rather than returned, matching the recoverable-error
/// policy of the listing itself.
pub struct ListingController<S: PageSource> {
    listing: ProductListing,
    source: S,
}

impl<S: PageSource> ListingController<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            listing: ProductListing::new(page_size),
            source,
        }
    }

    /// Reset and load the first page, optionally scoped to a category.
    #[instrument(skip(self))]
    pub async fn load_initial(&mut self, category_id: Option<&str>) {
        let (ticket, request) = self.listing.start_initial(category_id);
        let outcome = self.fetch(&request).await;
        self.listing.complete(ticket, outcome);
    }

    /// Load the next page. Returns `false` when nothing was fetched, i.e.
    /// a fetch was already in flight or the listing is exhausted.
    #[instrument(skip(self))]
    pub async fn load_more(&mut self) -> bool {
        let Some((ticket, request)) = self.listing.start_more() else {
            debug!("load_more skipped: in flight or exhausted");
            return false;
        };
        let outcome = self.fetch(&request).await;
        self.listing.complete(ticket, outcome) == Completion::Applied
    }

    async fn fetch(&self, request: &PageRequest) -> Result<PageResult, String> {
        self.source
            .fetch(request)
            .await
            .map_err(|e| e.to_string())
    }

    #[must_use]
    pub fn listing(&self) -> &ProductListing {
        &self.listing
    }
}
