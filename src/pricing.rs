//! Pricing resolver
//!
//! Turns a normal/discounted price pair into what a product page shows:
//! the effective price and, when a real markdown exists, the struck-through
//! original price and a `-N%` badge.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CurrencyFormat;
use crate::feed::RawFeed;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub amount: Decimal,
    pub price: String,
    pub original_amount: Option<Decimal>,
    pub original_price: Option<String>,
    pub discount_percent: Option<u32>,
    pub discount: Option<String>,
}

impl PriceDisplay {
    pub fn has_discount(&self) -> bool { self.discount.is_some() }
}

/// Resolve the display price for one normal/discounted pair.
pub fn resolve_price(normal: Decimal, discounted: Decimal, fmt: &CurrencyFormat) -> PriceDisplay {
    let amount = if discounted > Decimal::ZERO { discounted } else { normal };

    let markdown = discounted > Decimal::ZERO && discounted < normal && normal > Decimal::ZERO;
    let (original_amount, discount_percent) = if markdown {
        (Some(normal), Some(percent_off(normal, discounted)))
    } else {
        (None, None)
    };

    PriceDisplay {
        amount,
        price: fmt.format(amount),
        original_amount,
        original_price: original_amount.map(|n| fmt.format(n)),
        discount_percent,
        discount: discount_percent.map(|p| format!("-{p}%")),
    }
}

/// `round((normal - discounted) / normal * 100)`; callers guarantee `normal > 0`.
fn percent_off(normal: Decimal, discounted: Decimal) -> u32 {
    let pct = (normal - discounted) / normal * Decimal::ONE_HUNDRED;
    let rounded = pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_u32().unwrap_or(0)
}

/// Product-level headline price: the cheapest valid normal price and the
/// cheapest valid discounted price over the feed's rows, resolved as a pair.
/// Price slots past the end of the color sequence belong to no row and are
/// ignored.
///
/// This is coarser than per-variant pricing: the two minimums can come from
/// different rows. Returns `None` when the feed carries no positive price.
pub fn resolve_product_price(feed: &RawFeed, fmt: &CurrencyFormat) -> Option<PriceDisplay> {
    let positive = |p: Decimal| Some(p).filter(|p| *p > Decimal::ZERO);

    let normal = feed.rows().filter_map(|row| positive(row.normal_price())).min();
    let discounted = feed.rows().filter_map(|row| positive(row.discount_price())).min();
    if normal.is_none() && discounted.is_none() {
        return None;
    }

    Some(resolve_price(
        normal.unwrap_or(Decimal::ZERO),
        discounted.unwrap_or(Decimal::ZERO),
        fmt,
    ))
}
