//! Core types for the storefront catalog.
//!
//! This module provides type-safe wrappers for catalog identifiers and the
//! shapes of everything the storefront fetches.

pub mod catalog;
pub mod id;
pub mod money;

pub use catalog::{Catalog, Collection, Image, PageInfo, Paginator, Product, Shop, Variant};
pub use id::*;
pub use money::Money;
