//! Facet selection
//!
//! A [`SelectionState`] records which facets the shopper has locked and
//! which variant is on screen. Every transition takes the current state by
//! reference and returns the next one; nothing is mutated in place.
//!
//! Option lists are computed from the locks alone, never from the variant
//! that happens to be displayed, so the order in which facets are picked
//! does not change what is offered.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

use super::variant::{Variant, VariantSet};
use crate::domain::events::SelectionEvent;
use crate::domain::value_objects::{normalize_color, CanonicalColor};

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*([A-Za-z]*)").expect("valid regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Facet { Capacity, Memory }

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Locked color, as canonical hex.
    pub color: Option<String>,
    pub capacity: Option<String>,
    pub memory: Option<String>,
    /// Index of the displayed variant in the [`VariantSet`].
    pub active: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    #[serde(flatten)]
    pub color: CanonicalColor,
    pub has_stock: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub colors: Vec<ColorOption>,
    pub capacities: Vec<String>,
    pub memories: Vec<String>,
}

impl SelectionState {
    /// State the product page opens with: the first variant's color selected.
    pub fn initial(set: &VariantSet) -> Self {
        match set.get(0) {
            Some(first) => Self::default().select_color(set, &first.color.hex),
            None => Self::default(),
        }
    }

    pub fn active_variant<'a>(&self, set: &'a VariantSet) -> Option<&'a Variant> {
        self.active.and_then(|i| set.get(i))
    }

    pub fn apply(&self, set: &VariantSet, event: &SelectionEvent) -> Self {
        match event {
            SelectionEvent::ColorSelected { color } => self.select_color(set, color),
            SelectionEvent::CapacitySelected { value } => self.select_capacity(set, value),
            SelectionEvent::MemorySelected { value } => self.select_memory(set, value),
        }
    }

    /// Lock a color and clear the capacity and memory locks. The first
    /// variant of that color becomes active. Unknown colors change nothing.
    pub fn select_color(&self, set: &VariantSet, color: &str) -> Self {
        let hex = normalize_color(color).hex;
        match set.position(Some(&hex), None, None) {
            Some(index) => Self { color: Some(hex), capacity: None, memory: None, active: Some(index) },
            None => {
                tracing::debug!(color, "no variant in requested color");
                self.clone()
            }
        }
    }

    pub fn select_capacity(&self, set: &VariantSet, value: &str) -> Self {
        self.select_size(set, Facet::Capacity, value)
    }

    pub fn select_memory(&self, set: &VariantSet, value: &str) -> Self {
        self.select_size(set, Facet::Memory, value)
    }

    /// Lock `facet` to `value`. If no variant fits together with the other
    /// size lock, that lock is released and the match retried on color alone.
    /// When both attempts fail the state is returned unchanged.
    fn select_size(&self, set: &VariantSet, facet: Facet, value: &str) -> Self {
        let value = value.trim();
        let color = self.color.as_deref();
        let other_lock = match facet {
            Facet::Capacity => self.memory.as_deref(),
            Facet::Memory => self.capacity.as_deref(),
        };

        let find = |other: Option<&str>| match facet {
            Facet::Capacity => set.position(color, Some(value), other),
            Facet::Memory => set.position(color, other, Some(value)),
        };

        let (index, keep_other) = match find(other_lock) {
            Some(index) => (index, true),
            None if other_lock.is_some() => match find(None) {
                Some(index) => (index, false),
                None => return self.unchanged(facet, value),
            },
            None => return self.unchanged(facet, value),
        };

        let mut next = self.clone();
        next.active = Some(index);
        match facet {
            Facet::Capacity => {
                next.capacity = Some(value.to_string());
                if !keep_other { next.memory = None; }
            }
            Facet::Memory => {
                next.memory = Some(value.to_string());
                if !keep_other { next.capacity = None; }
            }
        }
        next
    }

    fn unchanged(&self, facet: Facet, value: &str) -> Self {
        tracing::debug!(?facet, value, color = ?self.color, "no variant matches selection, keeping current one");
        self.clone()
    }

    /// Values still offered for each facet under the current locks.
    pub fn options(&self, set: &VariantSet) -> FacetOptions {
        FacetOptions {
            colors: self.color_options(set),
            capacities: self.size_options(set, Facet::Capacity),
            memories: self.size_options(set, Facet::Memory),
        }
    }

    fn color_options(&self, set: &VariantSet) -> Vec<ColorOption> {
        let mut options: Vec<ColorOption> = Vec::new();
        for v in set.iter().filter(|v| v.matches(None, self.capacity.as_deref(), self.memory.as_deref())) {
            match options.iter_mut().find(|o| o.color.hex == v.color.hex) {
                Some(existing) => existing.has_stock |= v.in_stock(),
                None => options.push(ColorOption { color: v.color.clone(), has_stock: v.in_stock() }),
            }
        }
        options
    }

    fn size_options(&self, set: &VariantSet, facet: Facet) -> Vec<String> {
        let color = self.color.as_deref();
        let mut values: Vec<String> = Vec::new();
        for v in set.iter() {
            let (own, other_ok) = match facet {
                Facet::Capacity => (&v.capacity, v.matches(color, None, self.memory.as_deref())),
                Facet::Memory => (&v.memory, v.matches(color, self.capacity.as_deref(), None)),
            };
            if let (true, Some(value)) = (other_ok, own) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        values.sort_by(|a, b| compare_sizes(a, b));
        values
    }
}

/// Size of a value like `512GB` or `1 TB`, in gigabytes. Values without a
/// unit are taken as bare numbers.
fn size_in_gb(value: &str) -> Option<f64> {
    let caps = SIZE_RE.captures(value)?;
    let number: f64 = caps[1].replace(',', ".").parse().ok()?;
    let scale = match caps[2].to_ascii_uppercase().as_str() {
        "TB" | "T" => 1024.0,
        "MB" | "M" => 1.0 / 1024.0,
        "KB" | "K" => 1.0 / (1024.0 * 1024.0),
        _ => 1.0,
    };
    Some(number * scale)
}

/// Numeric order by size; non-numeric values sort after numeric ones, and
/// ties fall back to plain string order.
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (size_in_gb(a), size_in_gb(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
