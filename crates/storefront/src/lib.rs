//! Kittaly Storefront library.
//!
//! Server-rendered storefront for a headless Shopify shop. Catalog pages
//! load their products once and hand them to `kittaly_core`'s faceted
//! filter; the header renders the Shopify menu as a mega menu with a
//! collection image per group.
//!
//! The binary in `main.rs` only wires configuration, logging and the
//! listener around [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod shopify;
pub mod state;
