//! Type conversion functions for Storefront API responses.

pub mod collections;
pub mod products;

pub use collections::{convert_collection, convert_collections_page, convert_shop_front};
pub use products::{convert_page_info, convert_products};
