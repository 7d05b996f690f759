//! Response data shapes of the Storefront API operations.
//!
//! These mirror the selection sets in [`super::queries`] field for field;
//! `conversions` turns them into the `shopfront_core` model.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Relay connection: a list of edges plus optional page info.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: Option<PageInfoFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyFields {
    /// Decimal amount, sent by the API as a string.
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageFields {
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantFields {
    pub id: String,
    pub title: String,
    pub image: Option<ImageFields>,
    pub price: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub images: Connection<ImageFields>,
    pub variants: Connection<VariantFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopFields {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub products: Connection<ProductFields>,
}

/// Data of the `ShopFront` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopFrontData {
    pub shop: ShopFields,
    pub products: Connection<ProductFields>,
}

/// Data of the `CollectionByHandle` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionByHandleData {
    pub shop: ShopFields,
    pub collection: Option<CollectionFields>,
}

/// Data of the `CollectionsPage` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsPageData {
    pub collections: Connection<CollectionFields>,
}
