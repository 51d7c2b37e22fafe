//! Product Aggregate
//!
//! Read model for one product-detail view: the resolved variants plus the
//! product-wide headline price and stock.

use serde::{Deserialize, Serialize};

use super::variant::{aggregate, VariantSet};
use crate::config::DisplaySettings;
use crate::feed::RawFeed;
use crate::pricing::{resolve_product_price, PriceDisplay};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    variants: VariantSet,
    headline_price: Option<PriceDisplay>,
    total_stock: i64,
    in_stock: bool,
}

impl Product {
    pub fn from_feed(feed: &RawFeed, settings: &DisplaySettings) -> Self {
        let variants = aggregate(feed, settings);
        let total_stock = variants.total_stock();
        Self {
            headline_price: resolve_product_price(feed, &settings.currency),
            in_stock: total_stock > 0,
            total_stock,
            variants,
        }
    }

    pub fn variants(&self) -> &VariantSet { &self.variants }
    pub fn headline_price(&self) -> Option<&PriceDisplay> { self.headline_price.as_ref() }
    pub fn total_stock(&self) -> i64 { self.total_stock }
    pub fn is_in_stock(&self) -> bool { self.in_stock }
}
