//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify returns money as `{ amount: "19.99", currencyCode: "USD" }`. The
//! amount is kept as a [`Decimal`] so comparisons in the price facet are exact.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a Storefront API money pair.
    ///
    /// Returns `None` when the amount is not a decimal number.
    #[must_use]
    pub fn parse(amount: &str, currency_code: &str) -> Option<Self> {
        let amount = Decimal::from_str(amount.trim()).ok()?;
        Some(Self::new(amount, CurrencyCode::from(currency_code)))
    }

    /// Format for display (e.g., "$19.99", "CHF 12.00").
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.amount, &self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format an amount with two decimal places and the currency's symbol.
#[must_use]
pub fn format_amount(amount: Decimal, currency_code: &CurrencyCode) -> String {
    let rounded = amount.round_dp(2);
    match currency_code.symbol() {
        Some(symbol) => format!("{symbol}{rounded:.2}"),
        None => format!("{} {rounded:.2}", currency_code.code()),
    }
}

/// ISO 4217 currency codes.
///
/// The Storefront API can return any ISO code; the common ones get a
/// variant (and a symbol), everything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    Other(String),
}

impl CurrencyCode {
    /// The three-letter ISO code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::Other(code) => code,
        }
    }

    /// Display symbol, when one is unambiguous.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::USD | Self::CAD | Self::AUD => Some("$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        match code.as_str() {
            "USD" => Self::USD,
            "EUR" => Self::EUR,
            "GBP" => Self::GBP,
            "CAD" => Self::CAD,
            "AUD" => Self::AUD,
            _ => Self::Other(code),
        }
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_string()
    }
}

impl FromStr for CurrencyCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
