//! Aggregates module
pub mod product;
pub mod selection;
pub mod variant;

pub use product::Product;
pub use selection::{ColorOption, FacetOptions, SelectionState};
pub use variant::{aggregate, CanonicalKey, MediaEditView, Variant, VariantSet};
