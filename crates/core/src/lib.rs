//! Kittaly Core - catalog types and faceted product filtering.
//!
//! This crate provides the storefront's domain logic as pure functions:
//! - [`catalog`] - catalog items, facet extraction, query-string filter
//!   state, filtering and sorting, and the price-slider debounce state machine
//! - [`types`] - value types for prices and email addresses
//!
//! # Architecture
//!
//! The core crate contains no I/O, no HTTP clients and no shared mutable
//! state. Every filter view is derived from an immutable item list and a
//! [`catalog::FilterState`] parsed from the URL query string, so a view can
//! be recomputed on every request.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use types::*;
