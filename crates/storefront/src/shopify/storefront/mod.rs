//! Shopify Storefront API client implementation.
//!
//! Query documents come from the typed selection sets in [`selection`] and
//! [`queries`]; requests go out through `reqwest` as `graphql_client`
//! request bodies.

mod conversions;
pub mod queries;
mod selection;
mod wire;

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use secrecy::{ExposeSecret, SecretString};
use shopfront_core::{Catalog, Collection, Paginator, Shop};
use tracing::{debug, instrument};
use url::Url;

use crate::config::{CatalogConfig, StorefrontApiConfig};
use crate::shopify::{CatalogApi, CatalogError, CatalogQuery, GraphQLError, GraphQLErrorLocation};

use conversions::{convert_collection, convert_collections_page, convert_shop_front};
use queries::{
    CollectionByHandle, CollectionByHandleVariables, CollectionsPage, CollectionsPageVariables,
    ShopFront, ShopFrontVariables,
};

/// Header carrying the Storefront API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Products previewed per collection in collection listings.
const COLLECTION_PREVIEW_COUNT: i64 = 4;

/// Characters of a failing response body kept for diagnostics.
const BODY_EXCERPT_LEN: usize = 200;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
    catalog: CatalogConfig,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(api: &StorefrontApiConfig, catalog: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: api.api_url.clone(),
                access_token: api.access_token.clone(),
                catalog: catalog.clone(),
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, CatalogError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&response_text, 500),
                "Storefront API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: excerpt(&response_text, BODY_EXCERPT_LEN),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %excerpt(&response_text, 500),
                    "Failed to parse Storefront GraphQL response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(CatalogError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %excerpt(&response_text, 500),
                "Storefront GraphQL response has no data and no errors"
            );
            CatalogError::EmptyResponse
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Fetch the shop name, description and one page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    #[instrument(skip(self))]
    pub async fn fetch_shop_front(&self, after: Option<String>) -> Result<Shop, CatalogError> {
        let catalog = &self.inner.catalog;
        let variables = ShopFrontVariables {
            first: catalog.page_size,
            after,
            image_count: catalog.image_count,
            variant_count: catalog.variant_count,
        };

        let data = self.execute::<ShopFront>(variables).await?;
        let shop = convert_shop_front(data);
        debug!(products = shop.products.data.len(), "Fetched shop front");
        Ok(shop)
    }

    /// Fetch a collection and one page of its products.
    ///
    /// Returns `Ok(None)` when no collection has this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn fetch_collection_by_handle(
        &self,
        handle: &str,
        after: Option<String>,
    ) -> Result<Option<Collection>, CatalogError> {
        let (_, collection) = self.collection_with_shop(handle, after).await?;
        Ok(collection)
    }

    /// Fetch a page of collections, optionally filtered by a search query.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is invalid.
    #[instrument(skip(self))]
    pub async fn fetch_collections_page(
        &self,
        page_size: i64,
        cursor: Option<String>,
        query: Option<String>,
    ) -> Result<Paginator<Vec<Collection>>, CatalogError> {
        let variables = CollectionsPageVariables {
            first: page_size,
            after: cursor,
            query: query.filter(|q| !q.trim().is_empty()),
            product_count: COLLECTION_PREVIEW_COUNT,
        };

        let data = self.execute::<CollectionsPage>(variables).await?;
        Ok(convert_collections_page(data))
    }

    async fn collection_with_shop(
        &self,
        handle: &str,
        after: Option<String>,
    ) -> Result<(wire::ShopFields, Option<Collection>), CatalogError> {
        let catalog = &self.inner.catalog;
        let variables = CollectionByHandleVariables {
            handle: handle.to_string(),
            first: catalog.page_size,
            after,
            image_count: catalog.image_count,
            variant_count: catalog.variant_count,
        };

        let data = self.execute::<CollectionByHandle>(variables).await?;
        Ok((data.shop, data.collection.map(convert_collection)))
    }
}

impl CatalogApi for StorefrontClient {
    async fn fetch_catalog(&self, query: CatalogQuery) -> Result<Catalog, CatalogError> {
        match query {
            CatalogQuery::ShopFront { after } => {
                self.fetch_shop_front(after).await.map(Catalog::ShopFront)
            }
            CatalogQuery::CollectionByHandle { handle, after } => {
                let (shop, collection) = self.collection_with_shop(&handle, after).await?;
                let collection = collection
                    .ok_or_else(|| CatalogError::NotFound(format!("collection {handle}")))?;
                Ok(Catalog::Collection {
                    shop_name: shop.name,
                    shop_description: shop.description.filter(|d| !d.is_empty()),
                    collection,
                })
            }
        }
    }
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: error.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
