//! GraphQL query definitions for the Shopify Storefront API.
//!
//! Each operation implements [`GraphQLQuery`] by hand: its document is built
//! from typed selection sets once per process, and its response data is the
//! matching type in [`super::wire`].

use std::sync::LazyLock;

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Serialize;

use super::selection::{Document, Field, SelectionSet, Value, connection};
use super::wire;

// =============================================================================
// Shared selections
// =============================================================================

fn money() -> SelectionSet {
    SelectionSet::new().scalars(&["amount", "currencyCode"])
}

fn image() -> SelectionSet {
    SelectionSet::new().field(Field::new("url").alias("src"))
}

fn variant() -> SelectionSet {
    SelectionSet::new()
        .scalars(&["id", "title"])
        .field(Field::new("image").select(image()))
        .field(Field::new("price").select(money()))
}

fn product(image_count: Value, variant_count: Value) -> SelectionSet {
    SelectionSet::new()
        .scalars(&["id", "handle", "title", "description"])
        .field(connection(
            Field::new("images").arg("first", image_count),
            image(),
            false,
        ))
        .field(connection(
            Field::new("variants").arg("first", variant_count),
            variant(),
            true,
        ))
}

fn shop() -> Field {
    Field::new("shop").select(SelectionSet::new().scalars(&["name", "description"]))
}

fn paged_products() -> Field {
    connection(
        Field::new("products").var("first").var("after"),
        product(Value::Variable("imageCount"), Value::Variable("variantCount")),
        true,
    )
}

// =============================================================================
// Documents
// =============================================================================

/// `ShopFront`: shop name/description and a page of products.
pub fn shop_front_document() -> Document {
    Document::query(ShopFront::OPERATION_NAME)
        .variable("first", "Int!")
        .variable("after", "String")
        .variable("imageCount", "Int!")
        .variable("variantCount", "Int!")
        .select(SelectionSet::new().field(shop()).field(paged_products()))
}

/// `CollectionByHandle`: shop name/description and one collection with a page
/// of its products.
pub fn collection_by_handle_document() -> Document {
    Document::query(CollectionByHandle::OPERATION_NAME)
        .variable("handle", "String!")
        .variable("first", "Int!")
        .variable("after", "String")
        .variable("imageCount", "Int!")
        .variable("variantCount", "Int!")
        .select(
            SelectionSet::new().field(shop()).field(
                Field::new("collection").var("handle").select(
                    SelectionSet::new()
                        .scalars(&["id", "handle", "title"])
                        .field(paged_products()),
                ),
            ),
        )
}

/// `CollectionsPage`: a page of collections, each with a short product
/// preview.
pub fn collections_page_document() -> Document {
    Document::query(CollectionsPage::OPERATION_NAME)
        .variable("first", "Int!")
        .variable("after", "String")
        .variable("query", "String")
        .variable("productCount", "Int!")
        .select(SelectionSet::new().field(connection(
            Field::new("collections")
                .var("first")
                .var("after")
                .var("query"),
            SelectionSet::new()
                .scalars(&["id", "handle", "title"])
                .field(connection(
                    Field::new("products").arg("first", Value::Variable("productCount")),
                    product(Value::Int(1), Value::Int(1)),
                    true,
                )),
            true,
        )))
}

static SHOP_FRONT_QUERY: LazyLock<String> =
    LazyLock::new(|| shop_front_document().to_string());
static COLLECTION_BY_HANDLE_QUERY: LazyLock<String> =
    LazyLock::new(|| collection_by_handle_document().to_string());
static COLLECTIONS_PAGE_QUERY: LazyLock<String> =
    LazyLock::new(|| collections_page_document().to_string());

// =============================================================================
// Operations
// =============================================================================

/// Shop front page query.
pub struct ShopFront;

impl ShopFront {
    pub const OPERATION_NAME: &'static str = "ShopFront";
}

/// Variables for [`ShopFront`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopFrontVariables {
    pub first: i64,
    pub after: Option<String>,
    pub image_count: i64,
    pub variant_count: i64,
}

impl GraphQLQuery for ShopFront {
    type Variables = ShopFrontVariables;
    type ResponseData = wire::ShopFrontData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: SHOP_FRONT_QUERY.as_str(),
            operation_name: Self::OPERATION_NAME,
        }
    }
}

/// Collection-by-handle query.
pub struct CollectionByHandle;

impl CollectionByHandle {
    pub const OPERATION_NAME: &'static str = "CollectionByHandle";
}

/// Variables for [`CollectionByHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionByHandleVariables {
    pub handle: String,
    pub first: i64,
    pub after: Option<String>,
    pub image_count: i64,
    pub variant_count: i64,
}

impl GraphQLQuery for CollectionByHandle {
    type Variables = CollectionByHandleVariables;
    type ResponseData = wire::CollectionByHandleData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: COLLECTION_BY_HANDLE_QUERY.as_str(),
            operation_name: Self::OPERATION_NAME,
        }
    }
}

/// Collection search/listing query.
pub struct CollectionsPage;

impl CollectionsPage {
    pub const OPERATION_NAME: &'static str = "CollectionsPage";
}

/// Variables for [`CollectionsPage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsPageVariables {
    pub first: i64,
    pub after: Option<String>,
    pub query: Option<String>,
    pub product_count: i64,
}

impl GraphQLQuery for CollectionsPage {
    type Variables = CollectionsPageVariables;
    type ResponseData = wire::CollectionsPageData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: COLLECTIONS_PAGE_QUERY.as_str(),
            operation_name: Self::OPERATION_NAME,
        }
    }
}
