//! Session model owned by the state machine.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use shopfront_core::{Catalog, FocusCursor, Product, ProductId, Variant};

use crate::device::DeviceInfo;
use crate::routes::Route;
use crate::shopify::CatalogError;

/// Identifies one catalog fetch and its loading placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Broad category of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection or transport failure.
    Transport,
    /// Non-success HTTP status.
    Status,
    /// HTTP 429.
    RateLimited,
    /// Response body could not be decoded.
    Decode,
    /// The API reported GraphQL errors.
    GraphQL,
    /// The requested collection does not exist.
    NotFound,
    /// The response carried no data.
    Empty,
    /// The fetch task died before producing a result.
    Aborted,
}

/// A failed fetch, as kept in the session history and shown inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&CatalogError> for FetchFailure {
    fn from(err: &CatalogError) -> Self {
        let kind = match err {
            CatalogError::Http(_) => FailureKind::Transport,
            CatalogError::Status { .. } => FailureKind::Status,
            CatalogError::RateLimited(_) => FailureKind::RateLimited,
            CatalogError::Parse(_) => FailureKind::Decode,
            CatalogError::GraphQL(_) => FailureKind::GraphQL,
            CatalogError::NotFound(_) => FailureKind::NotFound,
            CatalogError::EmptyResponse => FailureKind::Empty,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<CatalogError> for FetchFailure {
    fn from(err: CatalogError) -> Self {
        Self::from(&err)
    }
}

/// One entry of the fetch history.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A fetch is in flight.
    Loading(RequestId),
    /// A fetch returned a catalog page.
    Success(Catalog),
    /// A fetch failed.
    Failure(FetchFailure),
}

impl QueryResult {
    /// The catalog, for successful entries.
    #[must_use]
    pub const fn catalog(&self) -> Option<&Catalog> {
        match self {
            Self::Success(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// Per-product variant cursors.
pub type VariantFocusMap = HashMap<ProductId, FocusCursor<Variant>>;

/// The whole session state.
///
/// Created by [`Storefront::initial_model`](super::Storefront::initial_model)
/// and only ever replaced through
/// [`Storefront::transition`](super::Storefront::transition).
#[derive(Debug, Clone, PartialEq)]
pub struct AppModel {
    /// Fetch outcomes, most recent first.
    pub query_results: VecDeque<QueryResult>,
    pub route: Route,
    pub device: DeviceInfo,
    /// Product currently on the detail view.
    pub product_focus: FocusCursor<Product>,
    /// Variant currently chosen for each product.
    pub variant_focus: VariantFocusMap,
    pub menu_focused: bool,
    next_request: u64,
}

impl AppModel {
    pub(super) fn new(device: DeviceInfo) -> Self {
        Self {
            query_results: VecDeque::new(),
            route: Route::Home,
            device,
            product_focus: FocusCursor::singleton(Product::placeholder()),
            variant_focus: VariantFocusMap::new(),
            menu_focused: false,
            next_request: 1,
        }
    }

    /// The most recent history entry.
    #[must_use]
    pub fn latest(&self) -> Option<&QueryResult> {
        self.query_results.front()
    }

    /// The most recently fetched catalog, skipping loading and failed entries.
    #[must_use]
    pub fn latest_catalog(&self) -> Option<&Catalog> {
        self.query_results.iter().find_map(QueryResult::catalog)
    }

    /// Whether any fetch is waiting for its result.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.query_results
            .iter()
            .any(|entry| matches!(entry, QueryResult::Loading(_)))
    }

    /// The variant currently chosen for `product`.
    #[must_use]
    pub fn selected_variant(&self, product: &ProductId) -> Option<&Variant> {
        self.variant_focus.get(product).map(FocusCursor::selected)
    }

    /// Move the model out, leaving a blank one with the same device behind.
    pub(crate) fn take(&mut self) -> Self {
        let blank = Self::new(self.device);
        std::mem::replace(self, blank)
    }

    /// Push a loading placeholder and return its id.
    pub(super) fn begin_fetch(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.query_results.push_front(QueryResult::Loading(request));
        request
    }

    /// Remove the loading placeholder for `request`.
    ///
    /// Returns `false` when there is none, i.e. the result is stale.
    pub(super) fn finish_fetch(&mut self, request: RequestId) -> bool {
        let position = self
            .query_results
            .iter()
            .position(|entry| matches!(entry, QueryResult::Loading(id) if *id == request));
        position
            .and_then(|index| self.query_results.remove(index))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Breakpoints;

    fn model() -> AppModel {
        AppModel::new(Breakpoints::default().classify(1024, 768))
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = model();
        assert!(model.query_results.is_empty());
        assert_eq!(model.route, Route::Home);
        assert!(model.product_focus.selected().is_placeholder());
        assert!(model.variant_focus.is_empty());
        assert!(!model.menu_focused);
    }

    #[test]
    fn test_fetch_placeholders() {
        let mut model = model();
        let first = model.begin_fetch();
        let second = model.begin_fetch();
        assert_ne!(first, second);
        assert_eq!(model.latest(), Some(&QueryResult::Loading(second)));
        assert!(model.is_loading());

        assert!(model.finish_fetch(first));
        assert!(!model.finish_fetch(first));
        assert!(model.finish_fetch(second));
        assert!(!model.is_loading());
        assert!(model.query_results.is_empty());
    }

    #[test]
    fn test_failure_kinds() {
        let failure = FetchFailure::from(CatalogError::RateLimited(3));
        assert_eq!(failure.kind, FailureKind::RateLimited);
        assert_eq!(failure.message, "Rate limited, retry after 3 seconds");

        let failure = FetchFailure::from(&CatalogError::NotFound("collection sale".to_string()));
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.to_string(), "Not found: collection sale");
    }
}
