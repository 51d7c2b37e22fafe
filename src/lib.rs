//! OpenSASE Variant Engine
//!
//! Resolves the sellable variants of a catalog product and drives the
//! color / capacity / memory pickers on its detail page.
//!
//! ## Features
//! - Color normalization from free text or hex
//! - Variant aggregation with duplicate-SKU tie-breaking
//! - Price, markdown and discount resolution
//! - Preview and gallery media resolution with placeholders
//! - Cross-filtering facet selection

pub mod api;
pub mod config;
pub mod domain;
pub mod feed;
pub mod media;
pub mod pricing;

use thiserror::Error;

pub use config::{DisplaySettings, EngineConfig};
pub use domain::aggregates::{
    aggregate, CanonicalKey, ColorOption, FacetOptions, MediaEditView, Product, SelectionState, Variant, VariantSet,
};
pub use domain::events::SelectionEvent;
pub use domain::value_objects::{normalize_color, CanonicalColor, CurrencyFormat, Sku, Stock};
pub use feed::RawFeed;
pub use media::{resolve_media, MediaSet};
pub use pricing::{resolve_price, resolve_product_price, PriceDisplay};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid value for {var}: {reason}")]
    Config { var: String, reason: String },

    #[error("Configuration failed validation: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
