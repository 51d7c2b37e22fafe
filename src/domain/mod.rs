//! Catalog domain: value objects, aggregates and selection events
pub mod aggregates;
pub mod events;
pub mod value_objects;
