//! JSON API the static page talks to.
//!
//! The page renders itself; the server hands it the copy for a language, the
//! derived visual state for a scroll position (for hosts that cannot run the
//! engine locally), the site constants, and accepts contact form leads.

use crate::config::Config;
use crate::error::LeadError;
use crate::i18n::{Catalog, Language, LanguageRegistry, TranslationMetrics};
use crate::lead::{whatsapp_chat_link, whatsapp_link, Lead, LeadRelay};
use crate::visual::{HeroSpan, ScrollSignal, VisualSnapshot};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

type ApiError = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: LeadRelay,
    pub catalog: &'static Catalog,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let relay = LeadRelay::from_config(&config);
        Self {
            config: Arc::new(config),
            relay,
            catalog: Catalog::global(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/site", get(site))
        .route("/api/i18n/:lang", get(catalog_for))
        .route("/api/i18n/:lang/:key", get(translate_key))
        .route("/api/metrics/translations", get(translation_metrics))
        .route("/api/visual-state", get(visual_state))
        .route("/api/leads", post(submit_lead))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, build_router(AppState::new(config)))
        .await
        .context("Server error")?;
    Ok(())
}

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

fn parse_language(code: &str) -> Result<Language, ApiError> {
    Language::from_code(code).map_err(|e| not_found(e.to_string()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn site(State(state): State<AppState>) -> Json<Value> {
    let registry = LanguageRegistry::get();
    let number = &state.config.whatsapp_number;

    let mut languages = Vec::new();
    let mut greeting_links = serde_json::Map::new();
    for config in registry.languages() {
        languages.push(json!({
            "code": config.code,
            "name": config.name,
            "native_name": config.native_name,
        }));
        if let Ok(lang) = Language::from_code(config.code) {
            greeting_links.insert(config.code.to_string(), json!(whatsapp_link(number, lang)));
        }
    }

    Json(json!({
        "map": {
            "latitude": state.config.map_latitude,
            "longitude": state.config.map_longitude,
        },
        "whatsapp": {
            "number": number,
            "chat_link": whatsapp_chat_link(number),
            "greeting_links": greeting_links,
        },
        "lead_reset_after_ms": state.config.lead_reset_after.as_millis() as u64,
        "default_language": registry.canonical().code,
        "languages": languages,
    }))
}

async fn catalog_for(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let lang = parse_language(&code)?;
    Ok(Json(json!({
        "lang": lang,
        "strings": state.catalog.resolved(lang),
    })))
}

async fn translate_key(
    State(state): State<AppState>,
    Path((code, key)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let lang = parse_language(&code)?;
    let value = state.catalog.translate(lang, &key);
    Ok(Json(json!({
        "lang": lang,
        "key": key,
        "value": value,
    })))
}

async fn translation_metrics() -> Json<Value> {
    Json(json!(TranslationMetrics::global().report()))
}

#[derive(Debug, Deserialize)]
pub struct VisualQuery {
    pub offset_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub hero_start: Option<f64>,
    pub hero_end: Option<f64>,
}

impl VisualQuery {
    pub fn signal(&self) -> ScrollSignal {
        ScrollSignal::new(self.offset_y, self.viewport_height, self.document_height)
    }

    /// The hero defaults to one full viewport at the top of the page.
    pub fn hero(&self) -> HeroSpan {
        let start = self.hero_start.unwrap_or(0.0);
        let end = self.hero_end.unwrap_or(start + self.viewport_height);
        HeroSpan::new(start, end)
    }
}

async fn visual_state(Query(query): Query<VisualQuery>) -> Json<VisualSnapshot> {
    Json(VisualSnapshot::from_signal(&query.signal(), &query.hero()))
}

async fn submit_lead(
    State(state): State<AppState>,
    Json(lead): Json<Lead>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if let Err(e) = lead.validate() {
        let reasons = match e {
            LeadError::Invalid(reasons) => reasons,
            other => vec![other.to_string()],
        };
        warn!("Rejected lead: {}", reasons.join(", "));
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "invalid lead", "reasons": reasons })),
        ));
    }

    // Delivery is never awaited; the form shows "sent" either way.
    state.relay.submit_detached(lead);
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "sent" }))))
}
