//! Inputs to and outputs of the state machine.

use shopfront_core::{Catalog, ProductId, VariantId};

use super::model::{FetchFailure, RequestId};
use crate::routes::UrlRequest;
use crate::shopify::CatalogQuery;

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The current path changed (push, back/forward, or initial load).
    RouteChanged(String),
    /// A catalog fetch issued as `RequestId` finished.
    FetchCompleted(RequestId, Result<Catalog, FetchFailure>),
    /// The shopper asked for the next page of products.
    LoadNextPage,
    /// The viewport was resized.
    DeviceReclassified {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
    /// The shopper picked a variant of a product.
    VariantSelected(ProductId, VariantId),
    /// The shopper opened a product from the grid.
    ProductSelected(ProductId),
    /// The search box text changed.
    SearchTextChanged(String),
    /// A link was clicked.
    LinkClicked(UrlRequest),
    /// The navigation menu button was pressed.
    MenuToggled,
}

/// Work the host must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a catalog query and report it back as `FetchCompleted(request, ..)`.
    Fetch {
        /// Id of the loading placeholder waiting for this fetch.
        request: RequestId,
        /// The query to run.
        query: CatalogQuery,
    },
    /// Push a path onto the history and report it as `RouteChanged`.
    PushUrl(String),
    /// Leave the session for an external URL.
    Load(String),
}
