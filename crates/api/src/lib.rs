use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use yatra_agents::{CatalogStatus, ExternalPlanner, OpenAiConfig, TravelAgent};
use yatra_core::{ChatContext, ItineraryRequest, PlanError};
use yatra_observability::{AppMetrics, MetricsSnapshot};
use yatra_storage::{DataStore, StoreConfig, TagError};

pub const DEFAULT_ADMIN_KEY: &str = "dev-yatra-key";
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Startup configuration for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub store: StoreConfig,
    pub admin_key: String,
    pub allowed_origins: Vec<String>,
    pub openai: Option<OpenAiConfig>,
}

impl ApiConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            admin_key: DEFAULT_ADMIN_KEY.to_string(),
            allowed_origins: Vec::new(),
            openai: None,
        }
    }

    pub fn from_env() -> Self {
        let admin_key = env::var("YATRA_ADMIN_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_KEY.to_string());

        Self {
            store: StoreConfig::from_env(),
            admin_key,
            allowed_origins: parse_allowed_origins(env::var("YATRA_ALLOWED_ORIGINS").ok()),
            openai: OpenAiConfig::from_env(),
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<TravelAgent<DataStore>>,
    pub metrics: Arc<AppMetrics>,
    pub admin_key: Arc<str>,
    pub allowed_origins: Arc<Vec<String>>,
}

impl ApiState {
    pub fn new(store: DataStore, external: ExternalPlanner, admin_key: impl Into<String>) -> Self {
        let metrics = AppMetrics::shared();
        let agent = TravelAgent::new(Arc::new(store), external, metrics.clone());
        Self {
            agent: Arc::new(agent),
            metrics,
            admin_key: Arc::from(admin_key.into()),
            allowed_origins: Arc::new(Vec::new()),
        }
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = Arc::new(origins);
        self
    }
}

pub fn build_app(config: ApiConfig) -> Result<Router> {
    let store = DataStore::load(config.store.clone()).context("failed to load travel catalog")?;
    let external = ExternalPlanner::new(config.openai.clone());
    info!(
        data_dir = %config.store.data_dir.display(),
        flagship = %config.store.flagship_id,
        external_model = external.model().unwrap_or("disabled"),
        "catalog loaded"
    );

    let state = ApiState::new(store, external, config.admin_key)
        .with_allowed_origins(config.allowed_origins);
    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/destinations", get(list_destinations))
        .route("/api/destination/:slug", get(destination_snapshot))
        .route("/api/itinerary", post(create_itinerary))
        .route("/api/chat", post(chat))
        .route("/api/admin/scraped", get(scraped_feed))
        .route("/api/admin/tag", post(tag_hidden_gem))
        .route("/api/admin/refresh", post(refresh_catalog))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_key_middleware,
        ))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    Plan(PlanError),
    Tag(TagError),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        Self::Plan(value)
    }
}

impl From<TagError> for ApiError {
    fn from(value: TagError) -> Self {
        Self::Tag(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Plan(err) => {
                let status = match err {
                    PlanError::NotFound { .. } => StatusCode::NOT_FOUND,
                    PlanError::Validation(_) => StatusCode::BAD_REQUEST,
                    PlanError::DataIntegrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind(), err.to_string())
            }
            Self::Tag(err) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "validation_error", message),
            Self::Internal(err) => {
                error!(error = %format!("{err:#}"), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    err.to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    #[serde(flatten)]
    catalog: CatalogStatus,
    metrics: MetricsSnapshot,
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        catalog: state.agent.status(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn list_destinations(State(state): State<ApiState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "destinations": state.agent.list_destinations()
    }))
}

async fn destination_snapshot(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.agent.destination_snapshot(&slug)?;
    Ok(Json(snapshot))
}

async fn create_itinerary(
    State(state): State<ApiState>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    yatra_core::validate_request(&request)?;
    let response = state.agent.generate_itinerary(&request).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    context: Option<ChatContext>,
}

async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let reply = state.agent.chat(&input.message, input.context.as_ref())?;
    Ok(Json(reply))
}

#[derive(Debug, Deserialize)]
struct ScrapedQuery {
    destination: Option<String>,
}

async fn scraped_feed(
    State(state): State<ApiState>,
    Query(query): Query<ScrapedQuery>,
) -> impl IntoResponse {
    let destination = query
        .destination
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    Json(state.agent.scraped_feed(destination))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagRequest {
    #[serde(alias = "item_id")]
    item_id: String,
    #[serde(default, alias = "destination_id")]
    destination_id: Option<String>,
}

async fn tag_hidden_gem(
    State(state): State<ApiState>,
    payload: Result<Json<TagRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let outcome = state
        .agent
        .mark_hidden_gem(&input.item_id, input.destination_id.as_deref())?;
    Ok(Json(outcome))
}

async fn refresh_catalog(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let version = state.agent.reload().map_err(ApiError::Internal)?;
    Ok(Json(serde_json::json!({
        "status": "reloaded",
        "version": version
    })))
}

async fn admin_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || !requires_admin_key(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if constant_time_eq(header_key.as_bytes(), state.admin_key.as_bytes()) {
        return next.run(request).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "unauthorized",
            "message": "missing or invalid x-api-key"
        })),
    )
        .into_response()
}

fn requires_admin_key(path: &str) -> bool {
    path.starts_with("/api/admin/")
}

fn constant_time_eq(lhs: &[u8], rhs: &[u8]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut diff = 0_u8;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        diff |= a ^ b;
    }
    diff == 0
}

fn parse_allowed_origins(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Any origin unless an explicit list is configured.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
}
