//! Web server for the price tracker
//!
//! Serves the Archidekt deck on `/api/cards` for the browser client, plus the
//! priced and classified view of the same deck. Resolution runs in the
//! background; the view answers 503 until a full pass has completed.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::annotate::AnnotatedEntry;
use crate::api::{ArchidektClient, ScryfallClient};
use crate::batch::{resolve_all, PriceStrategy};
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::view::{evaluate, selector_options, SelectorOptions, Selection};

/// Progress of the current resolution pass
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready {
        entries: Arc<Vec<AnnotatedEntry>>,
        loaded_at: DateTime<Utc>,
    },
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready { .. } => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    deck_id: u64,
    strategy: PriceStrategy,
    archidekt: ArchidektClient,
    scryfall: ScryfallClient,
    load: Arc<RwLock<LoadState>>,
    generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            deck_id: config.deck_id,
            strategy: config.strategy(),
            archidekt: config.archidekt_client(),
            scryfall: config.scryfall_client(),
            load: Arc::new(RwLock::new(LoadState::Loading)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn load_state(&self) -> LoadState {
        self.load.read().await.clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Start a fresh resolution pass in the background
///
/// Any pass still running is superseded: its results are dropped when it
/// finishes.
pub fn start_reload(state: &AppState) -> u64 {
    let generation = state.generation.fetch_add(1, Ordering::SeqCst) + 1;
    let state = state.clone();
    tokio::spawn(async move {
        run_reload(&state, generation).await;
    });
    generation
}

async fn run_reload(state: &AppState, generation: u64) {
    {
        let mut load = state.load.write().await;
        if !state.is_current(generation) {
            return;
        }
        *load = LoadState::Loading;
    }

    log::info!("Starting resolution pass {}", generation);

    let outcome = match state.archidekt.fetch_deck_cards(state.deck_id).await {
        Ok(cards) => {
            let entries = resolve_all(cards, state.strategy, &state.scryfall).await;
            LoadState::Ready {
                entries: Arc::new(entries),
                loaded_at: Utc::now(),
            }
        }
        Err(e) => {
            log::error!("Failed to fetch cards: {}", e);
            LoadState::Failed(e.to_string())
        }
    };

    let mut load = state.load.write().await;
    if state.is_current(generation) {
        *load = outcome;
        log::info!("Resolution pass {} finished ({})", generation, load.label());
    } else {
        log::info!("Discarding results of superseded pass {}", generation);
    }
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    fn err(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message.into()),
        })
    }
}

#[derive(Serialize)]
struct StatusData {
    ready: bool,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    loaded_at: Option<String>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ViewData {
    total: usize,
    shown: usize,
    rows: Vec<AnnotatedEntry>,
}

/// Entries of a completed pass, or the response to send instead
async fn ready_entries(state: &AppState) -> std::result::Result<Arc<Vec<AnnotatedEntry>>, Response> {
    match &*state.load.read().await {
        LoadState::Ready { entries, .. } => Ok(Arc::clone(entries)),
        LoadState::Loading => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            ApiResponse::<()>::err("Prices are still loading"),
        )
            .into_response()),
        LoadState::Failed(message) => Err((
            StatusCode::BAD_GATEWAY,
            ApiResponse::<()>::err(format!("Failed to load cards: {}", message)),
        )
            .into_response()),
    }
}

/// GET /api/health
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/cards - the deck's cards exactly as Archidekt returns them
async fn cards_handler(State(state): State<AppState>) -> Response {
    match state.archidekt.fetch_deck_cards_raw(state.deck_id).await {
        Ok(cards) => Json(cards).into_response(),
        Err(e) => {
            log::error!("Failed to fetch deck {}: {}", state.deck_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch deck" })),
            )
                .into_response()
        }
    }
}

/// GET /api/status
async fn status_handler(State(state): State<AppState>) -> Json<ApiResponse<StatusData>> {
    let load = state.load_state().await;
    let (loaded_at, count, error) = match &load {
        LoadState::Ready { entries, loaded_at } => (Some(loaded_at.to_rfc3339()), entries.len(), None),
        LoadState::Failed(message) => (None, 0, Some(message.clone())),
        LoadState::Loading => (None, 0, None),
    };

    ApiResponse::ok(StatusData {
        ready: load.is_ready(),
        state: load.label(),
        loaded_at,
        count,
        error,
    })
}

/// GET /api/view?mismatch_only=&move_up_only=&category=&color=&should_be=&sort=&direction=
async fn view_handler(State(state): State<AppState>, Query(selection): Query<Selection>) -> Response {
    let view_state = match selection.into_view_state() {
        Ok(view_state) => view_state,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, ApiResponse::<()>::err(e.to_string())).into_response()
        }
    };

    let entries = match ready_entries(&state).await {
        Ok(entries) => entries,
        Err(response) => return response,
    };

    let rows: Vec<AnnotatedEntry> = evaluate(&entries, &view_state)
        .into_iter()
        .cloned()
        .collect();

    ApiResponse::ok(ViewData {
        total: entries.len(),
        shown: rows.len(),
        rows,
    })
    .into_response()
}

/// GET /api/options
async fn options_handler(State(state): State<AppState>) -> Response {
    match ready_entries(&state).await {
        Ok(entries) => ApiResponse::<SelectorOptions>::ok(selector_options(&entries)).into_response(),
        Err(response) => response,
    }
}

/// POST /api/reload
async fn reload_handler(State(state): State<AppState>) -> impl IntoResponse {
    let generation = start_reload(&state);
    (
        StatusCode::ACCEPTED,
        ApiResponse::ok(serde_json::json!({ "generation": generation })),
    )
}

/// Build the web server router
///
/// With a static directory, every path not matched by the API is served from
/// it (the built browser client).
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/cards", get(cards_handler))
        .route("/api/status", get(status_handler))
        .route("/api/view", get(view_handler))
        .route("/api/options", get(options_handler))
        .route("/api/reload", post(reload_handler))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
/// Kicks off the first resolution pass before accepting connections.
pub async fn serve(config: &TrackerConfig, port: u16, static_dir: Option<&Path>) -> Result<()> {
    let state = AppState::new(config);
    start_reload(&state);

    let app = create_router(state, static_dir);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
