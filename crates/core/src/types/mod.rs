//! Core value types for Kittaly.

pub mod email;
pub mod price;

pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price, format_amount};
