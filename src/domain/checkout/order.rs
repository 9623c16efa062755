//! Order value objects: currency, amount and receipt number.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

use super::CheckoutError;

/// Minor units per major unit (paise per rupee, cents per dollar).
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// Three-letter ISO 4217 currency code, uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into().trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "must be a three-letter ISO 4217 code",
            ));
        }
        Ok(Self(code))
    }

    pub fn inr() -> Self {
        Self("INR".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::inr()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Currency {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.0
    }
}

/// Order total in the provider's minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderAmount(u64);

impl OrderAmount {
    /// Sums major-unit prices and converts to minor units.
    ///
    /// Fails on overflow rather than wrapping.
    pub fn from_major_prices<I>(prices: I) -> Result<Self, CheckoutError>
    where
        I: IntoIterator<Item = u64>,
    {
        let total = prices
            .into_iter()
            .try_fold(0u64, |acc, price| acc.checked_add(price))
            .ok_or_else(|| CheckoutError::validation("courses", "Order total is too large"))?;
        let minor = total
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .ok_or_else(|| CheckoutError::validation("courses", "Order total is too large"))?;
        Ok(Self(minor))
    }

    pub fn from_minor_units(minor: u64) -> Self {
        Self(minor)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Renders the amount in major units, e.g. `2500` → `"25.00"`.
    pub fn display_major(&self) -> String {
        format!(
            "{}.{:02}",
            self.0 / MINOR_UNITS_PER_MAJOR,
            self.0 % MINOR_UNITS_PER_MAJOR
        )
    }
}

/// Merchant-side receipt reference sent with every provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNumber(String);

impl ReceiptNumber {
    /// `receipt_<unix-millis>` for the current moment.
    pub fn generate() -> Self {
        Self::at(Timestamp::now())
    }

    pub fn at(ts: Timestamp) -> Self {
        Self(format!("receipt_{}", ts.unix_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
