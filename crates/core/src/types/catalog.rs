//! Catalog shapes fetched from the Storefront API.
//!
//! These types provide a clean, ergonomic model separate from the raw
//! connection/edge/node wire format. Every paginated field is wrapped in a
//! [`Paginator`] holding only the current page.

use serde::{Deserialize, Serialize};

use super::id::{CollectionId, ProductId, VariantId};
use super::money::Money;

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information for the most recently fetched page of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// A page of data plus its pagination flags.
///
/// `data` holds only the current page's items; pages are never accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator<T> {
    /// Items of the current page.
    pub data: T,
    /// Pagination info for the current page.
    pub page_info: PageInfo,
}

impl<T> Paginator<T> {
    /// Wrap a page of data.
    #[must_use]
    pub const fn new(data: T, page_info: PageInfo) -> Self {
        Self { data, page_info }
    }

    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page_info.has_next_page
    }

    /// Cursor to pass as `after` when fetching the next page.
    ///
    /// `None` when there is no next page or the server sent no cursor.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.page_info.has_next_page {
            self.page_info.end_cursor.as_deref()
        } else {
            None
        }
    }

    /// Transform the page data, keeping the page info.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Paginator<U> {
        Paginator {
            data: f(self.data),
            page_info: self.page_info,
        }
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or variant image. No identity beyond its source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub src: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID, unique within its product.
    pub id: VariantId,
    /// Variant title (combination of option values).
    pub title: String,
    /// Variant image.
    pub image: Option<Image>,
    /// Current price.
    pub price: Money,
}

impl Variant {
    /// Fallback element for cursors built over a product with no variants.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: VariantId::default(),
            title: String::new(),
            image: None,
            price: Money::zero(""),
        }
    }

    /// Whether this is the placeholder variant.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }
}

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID, used as the routing key for product-detail pages.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Product images.
    pub images: Vec<Image>,
    /// First page of variants.
    pub variants: Paginator<Vec<Variant>>,
}

impl Product {
    /// Fallback element for cursors built over an empty product list.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: ProductId::default(),
            handle: String::new(),
            title: String::new(),
            description: String::new(),
            images: Vec::new(),
            variants: Paginator::default(),
        }
    }

    /// Whether this is the placeholder product.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    /// The first product image, if any.
    #[must_use]
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }
}

// =============================================================================
// Shop & Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: CollectionId,
    /// URL handle (human-readable slug).
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Current page of products in this collection.
    pub products: Paginator<Vec<Product>>,
}

/// The shop: root aggregate of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Shop name.
    pub name: String,
    /// Shop description.
    pub description: Option<String>,
    /// Current page of products.
    pub products: Paginator<Vec<Product>>,
}

/// Payload of a successful home-page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Catalog {
    /// The shop's own product listing.
    ShopFront(Shop),
    /// A featured collection, plus the shop's name and description.
    Collection {
        /// Shop name.
        shop_name: String,
        /// Shop description.
        shop_description: Option<String>,
        /// The featured collection.
        collection: Collection,
    },
}

impl Catalog {
    /// The product page this catalog carries.
    #[must_use]
    pub const fn products(&self) -> &Paginator<Vec<Product>> {
        match self {
            Self::ShopFront(shop) => &shop.products,
            Self::Collection { collection, .. } => &collection.products,
        }
    }

    /// The shop name.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        match self {
            Self::ShopFront(shop) => &shop.name,
            Self::Collection { shop_name, .. } => shop_name,
        }
    }

    /// The shop description, if any.
    #[must_use]
    pub fn shop_description(&self) -> Option<&str> {
        match self {
            Self::ShopFront(shop) => shop.description.as_deref(),
            Self::Collection {
                shop_description, ..
            } => shop_description.as_deref(),
        }
    }

    /// Title of the featured collection, when the catalog is collection-backed.
    #[must_use]
    pub fn collection_title(&self) -> Option<&str> {
        match self {
            Self::ShopFront(_) => None,
            Self::Collection { collection, .. } => Some(&collection.title),
        }
    }
}
