//! Shopfront storefront library.
//!
//! A client-side storefront session over the Shopify Storefront API: the
//! catalog client, router, device classification, responsive view
//! selection and the application state machine, plus the event-loop runtime
//! that ties them together. The `shopfront` binary is a terminal host for it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod routes;
pub mod runtime;
pub mod shopify;
pub mod state;
pub mod views;
