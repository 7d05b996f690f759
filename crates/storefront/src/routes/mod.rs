//! Route parsing and path generation for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! /                      - Home (canonical form: /home)
//! /home                  - Home
//! /products/{id}         - Product detail, id percent-encoded
//! anything else          - NotFound, redirected to /home
//! ```

pub mod navigation;

use std::fmt;

use shopfront_core::ProductId;

pub use navigation::{History, UrlRequest, classify_link};

/// Canonical home path.
pub const HOME_PATH: &str = "/home";

/// Prefix of product detail paths.
pub const PRODUCTS_PREFIX: &str = "/products/";

/// A logical page of the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Home page with the product grid.
    Home,
    /// Product detail page.
    ProductDetail(ProductId),
    /// Unrecognized path.
    NotFound,
}

impl Route {
    /// Parse a path into a route.
    ///
    /// Query strings and fragments are ignored. Product ids are
    /// percent-decoded; an empty id, an undecodable id or extra path
    /// segments give [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        match path {
            "/" | HOME_PATH => Self::Home,
            _ => path
                .strip_prefix(PRODUCTS_PREFIX)
                .and_then(parse_product_id)
                .map_or(Self::NotFound, Self::ProductDetail),
        }
    }

    /// The path for this route.
    ///
    /// `NotFound` canonicalizes to the home path.
    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Self::Home | Self::NotFound => HOME_PATH.to_string(),
            Self::ProductDetail(id) => product_path(id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Path of a product's detail page.
#[must_use]
pub fn product_path(id: &ProductId) -> String {
    format!("{PRODUCTS_PREFIX}{}", urlencoding::encode(id.as_str()))
}

fn parse_product_id(segment: &str) -> Option<ProductId> {
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    let decoded = urlencoding::decode(segment).ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(ProductId::new(decoded.into_owned()))
}
