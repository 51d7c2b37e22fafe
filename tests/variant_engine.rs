//! End-to-end behaviour of the variant engine over realistic feeds.

use opensase_variants::{
    aggregate, normalize_color, DisplaySettings, RawFeed, SelectionEvent, SelectionState, VariantSet,
};
use rust_decimal::Decimal;
use serde_json::json;

fn feed_from(value: serde_json::Value) -> RawFeed {
    serde_json::from_value(value).expect("valid feed")
}

fn resolve(feed: &RawFeed) -> VariantSet {
    aggregate(feed, &DisplaySettings::default())
}

fn phone_feed() -> RawFeed {
    feed_from(json!({
        "colors":         ["Red", "red", "Rojo", "Midnight Black", "Red"],
        "capacities":     ["256GB", "256GB", "512GB", "256GB", "256GB"],
        "memories":       ["8GB", "12GB", "12GB", "8GB", "8GB"],
        "normalPrices":   [1000, 1100, 1300, 1000, 0],
        "discountPrices": [750, null, 1200, null, 0],
        "ecommerceStock": [3, 4, 0, 1, 50],
        "skus":           ["R-256-8", "R-256-12", "R-512-12", "K-256-8", "R-DEAD"],
        "previewImages":  ["r.png", ["", "r12.png"]],
        "detailImagesCsv": ["r1.png, r2.png"]
    }))
}

#[test]
fn aggregation_is_idempotent() {
    let feed = phone_feed();
    assert_eq!(resolve(&feed), resolve(&feed));
}

#[test]
fn duplicate_key_takes_every_field_from_one_row() {
    let feed = feed_from(json!({
        "colors":         ["red", "#E53935"],
        "capacities":     ["256GB", "256GB"],
        "normalPrices":   [900, 1000],
        "discountPrices": [null, 800],
        "ecommerceStock": [3, 10],
        "skus":           ["LOW-STOCK", "HIGH-STOCK"],
        "previewImages":  ["low.png", "high.png"]
    }));
    let set = resolve(&feed);
    assert_eq!(set.len(), 1);
    let v = set.get(0).unwrap();
    assert_eq!(v.stock.total(), 10);
    assert_eq!(v.price.price, "$800");
    assert_eq!(v.sku.as_ref().unwrap().as_str(), "HIGH-STOCK");
    assert_eq!(v.media.preview_image.as_deref(), Some("high.png"));
}

#[test]
fn unpriced_rows_are_excluded() {
    let set = resolve(&phone_feed());
    // the five rows hold three red keys and one black key; the unpriced red
    // row with 50 units neither adds a variant nor wins the red/256/8 slot
    assert_eq!(set.len(), 4);
    let red_256_8 = set.iter().find(|v| v.sku.as_ref().map(|s| s.as_str()) == Some("R-256-8")).unwrap();
    assert_eq!(red_256_8.stock.total(), 3);
    assert!(set.iter().all(|v| v.sku.as_ref().map(|s| s.as_str()) != Some("R-DEAD")));
}

#[test]
fn output_keeps_first_seen_order() {
    let set = resolve(&phone_feed());
    let skus: Vec<_> = set.iter().map(|v| v.sku.as_ref().unwrap().as_str().to_string()).collect();
    assert_eq!(skus, vec!["R-256-8", "R-256-12", "R-512-12", "K-256-8"]);
}

#[test]
fn color_normalization_always_yields_a_color() {
    for raw in ["Black", "#abcdef", "fuchsia-ish", "   ", "💜"] {
        let c = normalize_color(raw);
        assert!(c.hex.starts_with('#') && c.hex.len() == 7, "{raw:?} -> {c:?}");
    }
    assert_eq!(normalize_color("Midnight Black").label, "Midnight");
}

#[test]
fn detail_images_are_never_empty() {
    let set = resolve(&phone_feed());
    assert_eq!(set.get(0).unwrap().media.detail_images, vec!["r1.png", "r2.png"]);
    for v in &set {
        assert!(!v.media.detail_images.is_empty());
    }
    assert_eq!(set.get(2).unwrap().media.detail_images, vec!["/images/placeholder.png"]);
}

#[test]
fn discount_is_rendered_per_variant() {
    let set = resolve(&phone_feed());
    let v = set.get(0).unwrap();
    assert_eq!(v.price.price, "$750");
    assert_eq!(v.price.original_price.as_deref(), Some("$1.000"));
    assert_eq!(v.price.discount.as_deref(), Some("-25%"));
    assert_eq!(set.get(1).unwrap().price.discount, None);
}

#[test]
fn facet_selection_is_commutative() {
    let feed = feed_from(json!({
        "colors":       ["red", "red", "red"],
        "capacities":   ["256GB", "256GB", "512GB"],
        "memories":     ["8GB", "12GB", "12GB"],
        "normalPrices": [100, 100, 100]
    }));
    let set = resolve(&feed);
    let start = SelectionState::default().select_color(&set, "red");

    let a = start.select_capacity(&set, "512GB").select_memory(&set, "12GB");
    let b = start.select_memory(&set, "12GB").select_capacity(&set, "512GB");

    assert_eq!(a.active, b.active);
    let v = a.active_variant(&set).unwrap();
    assert_eq!((v.capacity.as_deref(), v.memory.as_deref()), (Some("512GB"), Some("12GB")));
}

#[test]
fn capacity_options_sort_by_size() {
    let feed = feed_from(json!({
        "colors":       ["black", "black", "black"],
        "capacities":   ["1TB", "256GB", "512GB"],
        "normalPrices": [100, 100, 100]
    }));
    let set = resolve(&feed);
    let options = SelectionState::initial(&set).options(&set);
    assert_eq!(options.capacities, vec!["256GB", "512GB", "1TB"]);
}

#[test]
fn impossible_selection_keeps_active_variant() {
    let set = resolve(&phone_feed());
    let state = SelectionState::initial(&set).apply(&set, &SelectionEvent::capacity("256GB"));
    let active_before = state.active_variant(&set).cloned();

    let after = state.apply(&set, &SelectionEvent::memory("999GB"));
    assert_eq!(after.active_variant(&set).cloned(), active_before);
    assert_eq!(after, state);
}

#[test]
fn shorter_sequences_are_tolerated() {
    let feed = feed_from(json!({
        "colors": ["white", "white", "blue"],
        "normalPrices": [Decimal::new(500, 0)],
        "discountPrices": [null, null, 200]
    }));
    let set = resolve(&feed);
    assert_eq!(set.len(), 2);
    assert_eq!(set.get(1).unwrap().price.price, "$200");
}
