//! HTTP surface
//!
//! Stateless: every request carries the raw feed and the engine is re-run
//! from scratch, which is cheap and keeps responses a pure function of the
//! request body.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::DisplaySettings;
use crate::domain::aggregates::{aggregate, FacetOptions, MediaEditView, Product, SelectionState, Variant, VariantSet};
use crate::domain::events::SelectionEvent;
use crate::domain::value_objects::normalize_color;
use crate::feed::RawFeed;
use crate::EngineError;

#[derive(Clone)] pub struct AppState { pub display: Arc<DisplaySettings> }

impl AppState {
    pub fn new(display: DisplaySettings) -> Self { Self { display: Arc::new(display) } }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-variants"})) }))
        .route("/api/v1/variants/resolve", post(resolve_variants))
        .route("/api/v1/variants/select", post(select_variant))
        .route("/api/v1/variants/media", post(media_for_edit))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

#[derive(Debug, Deserialize)] pub struct SelectRequest { pub feed: RawFeed, pub state: Option<SelectionState>, pub event: Option<SelectionEvent> }
#[derive(Debug, Serialize)] pub struct SelectResponse { pub state: SelectionState, pub active: Option<Variant>, pub options: FacetOptions }
#[derive(Debug, Deserialize)] pub struct MediaRequest { pub feed: RawFeed, pub state: Option<SelectionState> }

async fn resolve_variants(State(s): State<AppState>, Json(feed): Json<RawFeed>) -> Json<Product> {
    let product = Product::from_feed(&feed, &s.display);
    tracing::info!(rows = feed.len(), variants = product.variants().len(), "resolved product variants");
    Json(product)
}

async fn select_variant(State(s): State<AppState>, Json(r): Json<SelectRequest>) -> Result<Json<SelectResponse>, (StatusCode, String)> {
    let set = aggregate(&r.feed, &s.display);
    let mut state = current_state(&set, r.state).map_err(unprocessable)?;
    if let Some(event) = &r.event {
        state = state.apply(&set, event);
    }
    let active = state.active_variant(&set).cloned();
    let options = state.options(&set);
    Ok(Json(SelectResponse { state, active, options }))
}

async fn media_for_edit(State(s): State<AppState>, Json(r): Json<MediaRequest>) -> Result<Json<MediaEditView>, (StatusCode, String)> {
    let set = aggregate(&r.feed, &s.display);
    let state = current_state(&set, r.state).map_err(unprocessable)?;
    state.active_variant(&set).map(|v| Json(v.media_edit_view())).ok_or((StatusCode::NOT_FOUND, "No active variant".to_string()))
}

/// Caller-supplied state, or the opening state when none was sent. A locked
/// color may arrive as a name and is canonicalized to the hex variants carry.
fn current_state(set: &VariantSet, state: Option<SelectionState>) -> crate::Result<SelectionState> {
    match state {
        None => Ok(SelectionState::initial(set)),
        Some(state) => match state.active {
            Some(i) if i >= set.len() => Err(EngineError::InvalidSelection(format!(
                "active index {i} out of range for {} variants", set.len()
            ))),
            _ => Ok(SelectionState { color: state.color.as_deref().map(|c| normalize_color(c).hex), ..state }),
        },
    }
}

fn unprocessable(e: EngineError) -> (StatusCode, String) {
    tracing::warn!(error = %e, "rejected selection request");
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}
