//! Shopify Storefront API catalog client.
//!
//! # Architecture
//!
//! - Query documents are built from typed selection sets and rendered once
//! - Requests and responses use the `graphql_client` envelope types
//!   (`QueryBody`, `Response`) over `reqwest`
//! - Shopify is the source of truth: no local persistence, no response cache
//!
//! # Operations
//!
//! - `fetch_shop_front` - shop name/description and a page of products
//! - `fetch_collection_by_handle` - one collection and a page of its products
//! - `fetch_collections_page` - a page of collections, optionally filtered
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.api, &config.catalog);
//!
//! let shop = client.fetch_shop_front(None).await?;
//! let next = client
//!     .fetch_shop_front(shop.products.next_cursor().map(String::from))
//!     .await?;
//! ```

use std::future::Future;

use shopfront_core::Catalog;
use thiserror::Error;

mod storefront;

pub use storefront::{ACCESS_TOKEN_HEADER, StorefrontClient};
pub use storefront::queries;

/// Errors that can occur when talking to the Storefront API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading excerpt of the response body.
        body: String,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried neither data nor errors.
    #[error("Empty response: no data and no errors")]
    EmptyResponse,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A home-page fetch the state machine can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// The shop's product listing.
    ShopFront {
        /// Cursor of the last product on the previous page.
        after: Option<String>,
    },
    /// A collection's product listing, looked up by handle.
    CollectionByHandle {
        /// Collection handle.
        handle: String,
        /// Cursor of the last product on the previous page.
        after: Option<String>,
    },
}

impl CatalogQuery {
    /// The same query, moved to the page after `cursor`.
    #[must_use]
    pub fn with_after(self, cursor: Option<String>) -> Self {
        match self {
            Self::ShopFront { .. } => Self::ShopFront { after: cursor },
            Self::CollectionByHandle { handle, .. } => Self::CollectionByHandle {
                handle,
                after: cursor,
            },
        }
    }
}

/// Source of catalog pages for the runtime.
///
/// Implemented by [`StorefrontClient`]; tests drive sessions with fakes.
pub trait CatalogApi: Clone + Send + Sync + 'static {
    /// Fetch one home-page catalog.
    fn fetch_catalog(
        &self,
        query: CatalogQuery,
    ) -> impl Future<Output = Result<Catalog, CatalogError>> + Send;
}
