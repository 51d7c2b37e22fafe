//! Variant Aggregate
//!
//! Collapses the per-SKU rows of a [`RawFeed`] into one sellable [`Variant`]
//! per canonical (color, capacity, memory) key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::DisplaySettings;
use crate::domain::value_objects::{normalize_color, CanonicalColor, Sku, Stock};
use crate::feed::{RawFeed, RawRow};
use crate::media::{resolve_media, MediaSet};
use crate::pricing::{resolve_price, PriceDisplay};

const ABSENT: &str = "NA";

/// Grouping key. Two rows with equal keys are the same sellable variant,
/// whatever their SKU codes say.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalKey {
    pub color_hex: String,
    pub capacity: String,
    pub memory: String,
}

impl CanonicalKey {
    pub fn for_row(row: &RawRow<'_>) -> Self {
        Self {
            color_hex: normalize_color(row.color().unwrap_or_default()).hex,
            capacity: row.capacity().unwrap_or(ABSENT).to_string(),
            memory: row.memory().unwrap_or(ABSENT).to_string(),
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.color_hex, self.capacity, self.memory)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub key: CanonicalKey,
    pub color: CanonicalColor,
    pub capacity: Option<String>,
    pub memory: Option<String>,
    pub price: PriceDisplay,
    pub stock: Stock,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub media: MediaSet,
    /// Feed row every field above was taken from.
    pub source_index: usize,
}

/// The subset of a variant that the media editor pre-fills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEditView {
    pub sku: Option<Sku>,
    pub preview_image: Option<String>,
    pub detail_images: Vec<String>,
}

impl Variant {
    /// Build a variant entirely from one row; fields are never mixed across rows.
    pub fn from_row(row: &RawRow<'_>, settings: &DisplaySettings) -> Self {
        Self {
            key: CanonicalKey::for_row(row),
            color: normalize_color(row.color().unwrap_or_default()),
            capacity: row.capacity().map(str::to_string),
            memory: row.memory().map(str::to_string),
            price: resolve_price(row.normal_price(), row.discount_price(), &settings.currency),
            stock: row_stock(row),
            sku: row.sku().and_then(|s| Sku::new(s).ok()),
            description: row.description().map(str::to_string),
            media: resolve_media(row, &settings.placeholder_image),
            source_index: row.index(),
        }
    }

    pub fn in_stock(&self) -> bool { self.stock.in_stock() }

    /// `None` arguments are wildcards.
    pub fn matches(&self, color_hex: Option<&str>, capacity: Option<&str>, memory: Option<&str>) -> bool {
        color_hex.map_or(true, |hex| self.color.hex.eq_ignore_ascii_case(hex))
            && capacity.map_or(true, |c| self.capacity.as_deref() == Some(c))
            && memory.map_or(true, |m| self.memory.as_deref() == Some(m))
    }

    pub fn media_edit_view(&self) -> MediaEditView {
        MediaEditView {
            sku: self.sku.clone(),
            preview_image: self.media.preview_image.clone(),
            detail_images: self.media.detail_images.clone(),
        }
    }
}

fn row_stock(row: &RawRow<'_>) -> Stock { Stock::new(row.ecommerce_stock(), row.store_stock()) }

/// All variants of one product, in first-seen key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSet(Vec<Variant>);

impl VariantSet {
    pub fn new(variants: Vec<Variant>) -> Self { Self(variants) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn get(&self, index: usize) -> Option<&Variant> { self.0.get(index) }
    pub fn iter(&self) -> std::slice::Iter<'_, Variant> { self.0.iter() }
    pub fn total_stock(&self) -> i64 { self.0.iter().fold(0i64, |acc, v| acc.saturating_add(v.stock.total())) }

    /// Index of the first variant satisfying [`Variant::matches`].
    pub fn position(&self, color_hex: Option<&str>, capacity: Option<&str>, memory: Option<&str>) -> Option<usize> {
        self.0.iter().position(|v| v.matches(color_hex, capacity, memory))
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Group the feed into variants.
///
/// Unpriced rows are dropped. When several rows share a key the winner is
/// the one with strictly more total stock; on equal stock, a positive
/// discounted price strictly below the incumbent's wins; otherwise the
/// first row stays.
pub fn aggregate(feed: &RawFeed, settings: &DisplaySettings) -> VariantSet {
    let mut seeds: Vec<usize> = Vec::new();
    let mut slots: HashMap<CanonicalKey, usize> = HashMap::new();
    let mut skipped = 0usize;

    for row in feed.rows() {
        if !row.is_priced() {
            tracing::debug!(index = row.index(), "skipping unpriced row");
            skipped += 1;
            continue;
        }

        let key = CanonicalKey::for_row(&row);
        match slots.get(&key) {
            None => {
                slots.insert(key, seeds.len());
                seeds.push(row.index());
            }
            Some(&slot) => {
                let incumbent = feed.row(seeds[slot]);
                if supersedes(&row, &incumbent) {
                    tracing::debug!(%key, from = incumbent.index(), to = row.index(), "duplicate key, replacing seed row");
                    seeds[slot] = row.index();
                }
            }
        }
    }

    let variants: Vec<Variant> = seeds
        .into_iter()
        .map(|index| Variant::from_row(&feed.row(index), settings))
        .collect();

    tracing::debug!(rows = feed.len(), skipped, variants = variants.len(), "aggregated feed");
    VariantSet::new(variants)
}

fn supersedes(candidate: &RawRow<'_>, incumbent: &RawRow<'_>) -> bool {
    let (new_stock, old_stock) = (row_stock(candidate).total(), row_stock(incumbent).total());
    if new_stock != old_stock {
        return new_stock > old_stock;
    }
    let discounted = candidate.discount_price();
    discounted > Decimal::ZERO && discounted < incumbent.discount_price()
}
