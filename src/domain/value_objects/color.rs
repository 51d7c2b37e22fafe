//! Color normalization table
//!
//! Maps free-text or hex color values from the catalog feed onto a
//! canonical `(hex, label)` pair. Matching is order-sensitive: when no key
//! matches exactly, the first key contained in the input wins, so compound
//! names must sit above their plain counterparts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid regex"));

pub const FALLBACK_HEX: &str = "#9E9E9E";
const BLANK_LABEL: &str = "Unknown";

/// `(key, hex, label)` in match order.
static COLOR_TABLE: &[(&str, &str, &str)] = &[
    ("space gray", "#4A4A4C", "Space Gray"),
    ("gris espacial", "#4A4A4C", "Space Gray"),
    ("midnight", "#1F2A37", "Midnight"),
    ("medianoche", "#1F2A37", "Midnight"),
    ("starlight", "#F4EEE2", "Starlight"),
    ("rose gold", "#E0BFB8", "Rose Gold"),
    ("oro rosa", "#E0BFB8", "Rose Gold"),
    ("dark blue", "#1A237E", "Navy"),
    ("azul oscuro", "#1A237E", "Navy"),
    ("navy", "#1A237E", "Navy"),
    ("light blue", "#81D4FA", "Light Blue"),
    ("azul claro", "#81D4FA", "Light Blue"),
    ("sky blue", "#81D4FA", "Light Blue"),
    ("celeste", "#81D4FA", "Light Blue"),
    ("dark green", "#1B5E20", "Dark Green"),
    ("verde oscuro", "#1B5E20", "Dark Green"),
    ("mint", "#A8E6CF", "Mint"),
    ("menta", "#A8E6CF", "Mint"),
    ("black", "#000000", "Black"),
    ("negro", "#000000", "Black"),
    ("graphite", "#383838", "Graphite"),
    ("grafito", "#383838", "Graphite"),
    ("white", "#FFFFFF", "White"),
    ("blanco", "#FFFFFF", "White"),
    ("silver", "#C0C0C0", "Silver"),
    ("plata", "#C0C0C0", "Silver"),
    ("plateado", "#C0C0C0", "Silver"),
    ("gold", "#D4AF37", "Gold"),
    ("dorado", "#D4AF37", "Gold"),
    ("titanium", "#878681", "Titanium"),
    ("titanio", "#878681", "Titanium"),
    ("gray", "#808080", "Gray"),
    ("grey", "#808080", "Gray"),
    ("gris", "#808080", "Gray"),
    ("blue", "#1E88E5", "Blue"),
    ("azul", "#1E88E5", "Blue"),
    ("red", "#E53935", "Red"),
    ("rojo", "#E53935", "Red"),
    ("green", "#43A047", "Green"),
    ("verde", "#43A047", "Green"),
    ("yellow", "#FDD835", "Yellow"),
    ("amarillo", "#FDD835", "Yellow"),
    ("orange", "#FB8C00", "Orange"),
    ("naranja", "#FB8C00", "Orange"),
    ("purple", "#8E24AA", "Purple"),
    ("morado", "#8E24AA", "Purple"),
    ("lavender", "#B39DDB", "Lavender"),
    ("lavanda", "#B39DDB", "Lavender"),
    ("pink", "#EC407A", "Pink"),
    ("rosado", "#EC407A", "Pink"),
    ("rosa", "#EC407A", "Pink"),
    ("cream", "#FFFDD0", "Cream"),
    ("crema", "#FFFDD0", "Cream"),
    ("beige", "#F5F5DC", "Beige"),
    ("brown", "#795548", "Brown"),
    ("cafe", "#795548", "Brown"),
    ("marron", "#795548", "Brown"),
];

/// Canonical color: upper-case `#RRGGBB` plus a display label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalColor {
    pub hex: String,
    pub label: String,
}

impl CanonicalColor {
    fn new(hex: &str, label: impl Into<String>) -> Self {
        Self { hex: hex.to_string(), label: label.into() }
    }
}

/// Normalize a raw color value. Never fails: unknown values fall back to
/// neutral gray labelled with the capitalized input.
pub fn normalize_color(raw: &str) -> CanonicalColor {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CanonicalColor::new(FALLBACK_HEX, BLANK_LABEL);
    }

    if let Some(caps) = HEX_RE.captures(trimmed) {
        let hex = format!("#{}", caps[1].to_uppercase());
        return COLOR_TABLE
            .iter()
            .find(|(_, entry_hex, _)| entry_hex.eq_ignore_ascii_case(&hex))
            .map(|(_, entry_hex, label)| CanonicalColor::new(entry_hex, *label))
            .unwrap_or_else(|| CanonicalColor::new(&hex, hex.clone()));
    }

    let key = trimmed.to_lowercase();
    let found = COLOR_TABLE
        .iter()
        .find(|(name, _, _)| *name == key)
        .or_else(|| COLOR_TABLE.iter().find(|(name, _, _)| key.contains(name)));

    match found {
        Some((_, hex, label)) => CanonicalColor::new(hex, *label),
        None => CanonicalColor::new(FALLBACK_HEX, capitalize(trimmed)),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
