//! Shopfront Core - Catalog domain types.
//!
//! This crate provides the data shared by every part of the storefront:
//! - the catalog shapes returned by the Storefront API (shop, collections,
//!   products, variants, images, money)
//! - the uniform [`Paginator`] wrapper used for every paginated field
//! - [`FocusCursor`], a non-empty list with exactly one selected element
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no async. This keeps the state machine that consumes it fully
//! deterministic and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Catalog model, newtype ids and money
//! - [`cursor`] - The focus cursor ADT

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cursor;
pub mod types;

pub use cursor::FocusCursor;
pub use types::*;
