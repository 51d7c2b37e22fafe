//! Selection events
//!
//! What the product page sends when a shopper clicks a swatch or a size chip.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    ColorSelected { color: String },
    CapacitySelected { value: String },
    MemorySelected { value: String },
}

impl SelectionEvent {
    pub fn color(color: impl Into<String>) -> Self { Self::ColorSelected { color: color.into() } }
    pub fn capacity(value: impl Into<String>) -> Self { Self::CapacitySelected { value: value.into() } }
    pub fn memory(value: impl Into<String>) -> Self { Self::MemorySelected { value: value.into() } }
}
