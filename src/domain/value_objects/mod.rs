//! Value Objects for variant resolution

pub mod color;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use color::{normalize_color, CanonicalColor};

/// SKU (Stock Keeping Unit) value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(String);

impl Sku {
    pub fn new(value: impl Into<String>) -> Result<Self, SkuError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(SkuError::Empty); }
        if value.chars().count() > 50 { return Err(SkuError::TooLong); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum SkuError { Empty, TooLong }
impl std::error::Error for SkuError {}
impl fmt::Display for SkuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "SKU empty"), Self::TooLong => write!(f, "SKU too long") }
    }
}

/// Display rules for money amounts.
///
/// One format is shared by every price string the engine emits, so the
/// product headline and each variant always render the same way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            fraction_digits: 0,
        }
    }
}

impl CurrencyFormat {
    /// Render `amount` with thousands grouping, e.g. `1234567` -> `$1.234.567`.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        let text = format!("{:.*}", self.fraction_digits as usize, rounded);
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, d) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(*d);
        }

        let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        match frac_part {
            Some(f) if !f.is_empty() => format!("{sign}{}{grouped}{}{f}", self.symbol, self.decimal_separator),
            _ => format!("{sign}{}{grouped}", self.symbol),
        }
    }
}

/// Stock for one variant: the online warehouse plus every physical store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    ecommerce: i64,
    stores: BTreeMap<String, i64>,
    total: i64,
}

impl Stock {
    pub fn new(ecommerce: i64, stores: BTreeMap<String, i64>) -> Self {
        let total = stores.values().fold(ecommerce, |acc, n| acc.saturating_add(*n));
        Self { ecommerce, stores, total }
    }
    pub fn ecommerce(&self) -> i64 { self.ecommerce }
    pub fn stores(&self) -> &BTreeMap<String, i64> { &self.stores }
    pub fn total(&self) -> i64 { self.total }
    pub fn in_stock(&self) -> bool { self.total > 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sku_trims() { let sku = Sku::new("  prod-001 ").unwrap(); assert_eq!(sku.as_str(), "prod-001"); }

    #[test]
    fn test_sku_rejects_blank_and_long() {
        assert_eq!(Sku::new("   "), Err(SkuError::Empty));
        assert_eq!(Sku::new("X".repeat(51)), Err(SkuError::TooLong));
    }

    #[test]
    fn test_format_groups_thousands() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Decimal::new(1000, 0)), "$1.000");
        assert_eq!(fmt.format(Decimal::new(750, 0)), "$750");
        assert_eq!(fmt.format(Decimal::new(1_234_567, 0)), "$1.234.567");
        assert_eq!(fmt.format(Decimal::new(999_995, 1)), "$100.000");
    }

    #[test]
    fn test_format_with_fraction_digits() {
        let fmt = CurrencyFormat {
            symbol: "USD ".into(),
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            fraction_digits: 2,
        };
        assert_eq!(fmt.format(Decimal::new(123_456_789, 2)), "USD 1,234,567.89");
        assert_eq!(fmt.format(Decimal::new(5, 1)), "USD 0.50");
    }

    #[test]
    fn test_stock_total() {
        let stores = BTreeMap::from([("north".to_string(), 2), ("south".to_string(), 3)]);
        let stock = Stock::new(5, stores);
        assert_eq!(stock.total(), 10);
        assert!(stock.in_stock());
        assert!(!Stock::new(0, BTreeMap::new()).in_stock());
    }
}
