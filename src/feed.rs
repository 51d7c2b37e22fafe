//! Raw product feed
//!
//! The catalog backend ships one product as index-aligned sequences: slot
//! `i` of every sequence describes the same physical SKU. Sequences may be
//! shorter than the color sequence or contain `null`; either way the value
//! is simply absent for that row.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Preview images arrive either as one URL or as a list per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// First non-blank entry.
    pub fn first_non_blank(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            Self::Many(v) => v.iter().map(|s| s.trim()).find(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFeed {
    #[serde(deserialize_with = "lenient_seq")]
    pub colors: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub capacities: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub memories: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub normal_prices: Vec<Option<Decimal>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub discount_prices: Vec<Option<Decimal>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub ecommerce_stock: Vec<Option<i64>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub store_stock: Vec<Option<BTreeMap<String, i64>>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub skus: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub descriptions: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub preview_images: Vec<Option<OneOrMany>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub detail_images: Vec<Option<Vec<String>>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub detail_images_csv: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub premium_images: Vec<Option<Vec<String>>>,
    #[serde(deserialize_with = "lenient_seq")]
    pub premium_videos: Vec<Option<Vec<String>>>,
}

/// Deserialize one feed sequence without letting a bad element fail the
/// whole feed. A missing or non-array field is an empty sequence; an element
/// that does not fit `T` is `None`. Numeric strings (`"5"`) and bare numbers
/// standing in for text are coerced.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items.into_iter().map(lenient_element).collect())
}

fn lenient_element<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::String(s) => serde_json::from_value(Value::String(s.clone()))
            .ok()
            .or_else(|| serde_json::from_str(s.trim()).ok()),
        Value::Number(n) => serde_json::from_value(Value::Number(n.clone()))
            .ok()
            .or_else(|| serde_json::from_value(Value::String(n.to_string())).ok()),
        other => serde_json::from_value(other).ok(),
    }
}

/// Value at `index`, or `None` when the sequence is too short or holds null.
pub fn value_at<T>(seq: &[Option<T>], index: usize) -> Option<&T> {
    seq.get(index).and_then(Option::as_ref)
}

/// Text value at `index`, trimmed; blank strings count as absent.
pub fn text_at(seq: &[Option<String>], index: usize) -> Option<&str> {
    value_at(seq, index).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Borrowed view of one physical SKU row.
#[derive(Clone, Copy, Debug)]
pub struct RawRow<'a> {
    feed: &'a RawFeed,
    index: usize,
}

impl<'a> RawRow<'a> {
    pub fn index(&self) -> usize { self.index }
    pub fn color(&self) -> Option<&'a str> { text_at(&self.feed.colors, self.index) }
    pub fn capacity(&self) -> Option<&'a str> { text_at(&self.feed.capacities, self.index) }
    pub fn memory(&self) -> Option<&'a str> { text_at(&self.feed.memories, self.index) }
    pub fn sku(&self) -> Option<&'a str> { text_at(&self.feed.skus, self.index) }
    pub fn description(&self) -> Option<&'a str> { text_at(&self.feed.descriptions, self.index) }

    /// Normal price, zero when absent.
    pub fn normal_price(&self) -> Decimal {
        value_at(&self.feed.normal_prices, self.index).copied().unwrap_or(Decimal::ZERO)
    }

    /// Discounted price, zero when absent.
    pub fn discount_price(&self) -> Decimal {
        value_at(&self.feed.discount_prices, self.index).copied().unwrap_or(Decimal::ZERO)
    }

    /// A row with neither a positive normal nor a positive discounted price
    /// cannot be sold.
    pub fn is_priced(&self) -> bool {
        self.normal_price() > Decimal::ZERO || self.discount_price() > Decimal::ZERO
    }

    pub fn ecommerce_stock(&self) -> i64 {
        value_at(&self.feed.ecommerce_stock, self.index).copied().unwrap_or(0)
    }

    pub fn store_stock(&self) -> BTreeMap<String, i64> {
        value_at(&self.feed.store_stock, self.index).cloned().unwrap_or_default()
    }

    pub fn preview_image(&self) -> Option<&'a str> {
        value_at(&self.feed.preview_images, self.index).and_then(OneOrMany::first_non_blank)
    }

    pub fn detail_images(&self) -> Option<&'a [String]> {
        value_at(&self.feed.detail_images, self.index).map(Vec::as_slice)
    }

    pub fn detail_images_csv(&self) -> Option<&'a str> {
        value_at(&self.feed.detail_images_csv, self.index).map(String::as_str)
    }

    pub fn premium_images(&self) -> Option<&'a [String]> {
        value_at(&self.feed.premium_images, self.index).map(Vec::as_slice)
    }

    pub fn premium_videos(&self) -> Option<&'a [String]> {
        value_at(&self.feed.premium_videos, self.index).map(Vec::as_slice)
    }
}

impl RawFeed {
    /// Number of rows; the color sequence drives iteration.
    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    pub fn row(&self, index: usize) -> RawRow<'_> { RawRow { feed: self, index } }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        (0..self.len()).map(move |index| self.row(index))
    }
}
