//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No Shopify credentials are needed: [`FakeCatalogApi`] serves the
//! Storefront GraphQL endpoint from an in-process axum server on an
//! ephemeral port, records every request and answers with whatever the
//! test's responder returns.
//!
//! # Test Categories
//!
//! - `catalog_client` - the HTTP client against canned API responses
//! - `session` - whole browsing sessions through the runtime

use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use shopfront::config::{CatalogConfig, StorefrontApiConfig};
use shopfront::shopify::{ACCESS_TOKEN_HEADER, StorefrontClient};
use tokio::task::JoinHandle;
use url::Url;

/// Access token the fake API expects.
pub const ACCESS_TOKEN: &str = "7c1e9a4f2b8d3605e1f7a9c2d4b6e8f0";

/// Path the fake API serves GraphQL on.
pub const GRAPHQL_PATH: &str = "/api/2026-01/graphql.json";

/// A request as received by the fake API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub access_token: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    /// The GraphQL operation name.
    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.body.get("operationName").and_then(Value::as_str)
    }

    /// A GraphQL variable, `Null` when absent.
    #[must_use]
    pub fn variable(&self, name: &str) -> &Value {
        self.body
            .get("variables")
            .and_then(|variables| variables.get(name))
            .unwrap_or(&Value::Null)
    }
}

/// What the fake API answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `200` with `{"data": ..}`.
    Data(Value),
    /// `200` with an arbitrary JSON body.
    Json(Value),
    /// Any status with a plain-text body.
    Status(u16, String),
    /// `429`, with an optional `Retry-After` header.
    RateLimited(Option<String>),
}

type Responder = dyn Fn(&RecordedRequest) -> Reply + Send + Sync;

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

/// In-process stand-in for the Storefront API.
pub struct FakeCatalogApi {
    url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: JoinHandle<()>,
}

impl FakeCatalogApi {
    /// Start serving on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(
        responder: impl Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let app = Router::new()
            .route(GRAPHQL_PATH, post(graphql))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = Url::parse(&format!("http://{addr}{GRAPHQL_PATH}"))
            .expect("Fake API URL should parse");
        Self {
            url,
            requests,
            server,
        }
    }

    /// The GraphQL endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Connection settings pointing at this server.
    #[must_use]
    pub fn api_config(&self) -> StorefrontApiConfig {
        StorefrontApiConfig {
            api_url: self.url.clone(),
            access_token: SecretString::from(ACCESS_TOKEN.to_string()),
        }
    }

    /// A real client pointing at this server.
    #[must_use]
    pub fn client(&self, catalog: &CatalogConfig) -> StorefrontClient {
        StorefrontClient::new(&self.api_config(), catalog)
    }
}

impl Drop for FakeCatalogApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn graphql(State(state): State<ServerState>, headers: HeaderMap, body: String) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    let request = RecordedRequest {
        access_token: header_value(ACCESS_TOKEN_HEADER),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };

    let reply = (state.responder)(&request);
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    match reply {
        Reply::Data(data) => Json(json!({ "data": data })).into_response(),
        Reply::Json(body) => Json(body).into_response(),
        Reply::Status(status, body) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
        Reply::RateLimited(retry_after) => {
            let mut response = (StatusCode::TOO_MANY_REQUESTS, "Throttled").into_response();
            if let Some(value) = retry_after.and_then(|v| HeaderValue::from_str(&v).ok()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

/// JSON builders for Storefront API response data.
pub mod fixtures {
    use serde_json::{Value, json};

    /// A `pageInfo` object.
    #[must_use]
    pub fn page_info(has_next_page: bool, end_cursor: Option<&str>) -> Value {
        json!({
            "hasNextPage": has_next_page,
            "hasPreviousPage": false,
            "startCursor": null,
            "endCursor": end_cursor,
        })
    }

    /// A product node with one image and the given `(id, title, amount)`
    /// variants priced in USD.
    #[must_use]
    pub fn product(id: &str, title: &str, variants: &[(&str, &str, &str)]) -> Value {
        let variant_edges: Vec<Value> = variants
            .iter()
            .map(|(variant_id, variant_title, amount)| {
                json!({
                    "node": {
                        "id": variant_id,
                        "title": variant_title,
                        "image": null,
                        "price": { "amount": amount, "currencyCode": "USD" },
                    }
                })
            })
            .collect();

        json!({
            "id": id,
            "handle": title.to_lowercase().replace(' ', "-"),
            "title": title,
            "description": format!("All about {title}."),
            "images": { "edges": [{ "node": { "src": format!("https://cdn.example.com/{title}.jpg") } }] },
            "variants": { "edges": variant_edges, "pageInfo": page_info(false, None) },
        })
    }

    /// A products connection.
    #[must_use]
    pub fn products(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
        let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
        json!({ "edges": edges, "pageInfo": page_info(has_next_page, end_cursor) })
    }

    /// Data of a `ShopFront` response.
    #[must_use]
    pub fn shop_front(name: &str, products: Value) -> Value {
        json!({
            "shop": { "name": name, "description": "Fresh fruit, dried." },
            "products": products,
        })
    }

    /// Data of a `CollectionByHandle` response; `None` for an unknown handle.
    #[must_use]
    pub fn collection_by_handle(name: &str, collection: Option<(&str, &str, Value)>) -> Value {
        let collection = collection.map(|(handle, title, products)| {
            json!({
                "id": format!("gid://shopify/Collection/{handle}"),
                "handle": handle,
                "title": title,
                "products": products,
            })
        });
        json!({
            "shop": { "name": name, "description": null },
            "collection": collection,
        })
    }
}
