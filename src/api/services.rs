use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use super::{
    error::ApiError,
    models::{
        FieldRequest, FieldResponse, HealthResponse, RenderRequest, ResolveRequest,
        ResolveResponse, TemplateResponse,
    },
    state::AppState,
};
use crate::dispatch::{self, ResolvedMedia};
use crate::media::MediaFile;
use crate::observability::Metrics;

/// Resolve a media to its canonical URI or filtered derivative
/// (POST /media/resolve)
///
/// Malformed bodies are reported as `INVALID_PAYLOAD`.
pub async fn resolve(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResolveResponse>, ApiError> {
    let ResolveRequest {
        mut media,
        filter,
        options,
    } = serde_json::from_slice(&body)?;

    let resolved = state
        .dispatcher
        .resolve_filtered_media(&mut media, filter.as_deref(), &options)
        .await;
    let resolved = track(&state.metrics, resolved)?;

    let filtered = resolved.is_filtered();
    Ok(Json(ResolveResponse {
        media: resolved.into_owned(),
        filtered,
    }))
}

/// Resolve a media, then render it through a template alias
/// (POST /media/render)
pub async fn render(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let RenderRequest {
        mut media,
        filter,
        template,
        options,
    } = serde_json::from_slice(&body)?;

    let resolved = state
        .dispatcher
        .resolve_filtered_media(&mut media, filter.as_deref(), &options)
        .await;
    let resolved = track(&state.metrics, resolved)?;

    let view = state.dispatcher.render_template(
        &state.renderer,
        &*resolved,
        template.as_deref(),
        &options,
    )?;
    state.metrics.rendered();

    Ok(Json(view))
}

/// Read one named field of a media (POST /media/field)
pub async fn field(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FieldResponse>, ApiError> {
    let FieldRequest { media, property } = serde_json::from_slice(&body)?;

    let value = state
        .dispatcher
        .read_metadata(&property, media.as_ref())?;

    Ok(Json(FieldResponse { property, value }))
}

/// Template identifier an alias resolves to (GET /templates/{alias})
pub async fn template(
    State(state): State<AppState>,
    Path(alias): Path<String>,
) -> Json<TemplateResponse> {
    let template = state.dispatcher.templates().resolve(Some(&alias)).to_string();
    Json(TemplateResponse { alias, template })
}

/// Resolution counters (GET /metrics)
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check endpoint (GET /health)
///
/// Lists the configured media kinds and filter aliases. Lookup tables are
/// fixed at startup, so a running server is healthy.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let dispatcher = &state.dispatcher;

    let response = HealthResponse {
        status: "healthy".to_string(),
        handlers: dispatcher.handlers().kinds().map(str::to_string).collect(),
        filters: dispatcher.filters().aliases().map(str::to_string).collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

fn track<'a>(
    metrics: &Metrics,
    result: dispatch::Result<ResolvedMedia<'a, MediaFile>>,
) -> Result<ResolvedMedia<'a, MediaFile>, ApiError> {
    match &result {
        Ok(media) if media.is_filtered() => metrics.filtered_resolved(),
        Ok(_) => metrics.canonical_resolved(),
        Err(_) => metrics.resolution_failed(),
    }
    Ok(result?)
}
