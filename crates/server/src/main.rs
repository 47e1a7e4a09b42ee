// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use endo_rota_api::{
    ApiError, ApplySwapsRequest, ApplySwapsResponse, DeleteVersionRequest, ExportScheduleRequest,
    ExportScheduleResponse, FinalizeVersionRequest, GenerateScheduleRequest, ListVersionsRequest,
    ListVersionsResponse, SaveVersionRequest, ScheduleResponse, VersionInfo, apply_swaps,
    delete_version, export_schedule_csv, finalize_version, generate_schedule, list_versions,
    save_version,
};
use endo_rota_store::{MemoryStore, SqliteStore, TableStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Endo Rota Server - HTTP server for the endoscopy unit rostering system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory store.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The table store is wrapped in a Mutex so write operations are
/// serialized; every roster operation for a month reads and writes the
/// same family of sheets.
#[derive(Clone)]
struct AppState {
    /// The backing table store.
    store: Arc<Mutex<Box<dyn TableStore + Send>>>,
}

/// Query parameters for listing versions.
#[derive(Debug, Deserialize)]
struct ListVersionsQuery {
    /// The target month, `YYYY-MM`.
    month: String,
}

/// Query parameters for a CSV export.
#[derive(Debug, Deserialize)]
struct ExportQuery {
    /// The target month, `YYYY-MM`.
    month: String,
    /// The version to export.
    tag: String,
    /// Which table: `shift` or `rooms`.
    table: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::VersionNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(store_err) => {
                error!(error = %store_err, "Store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ if err.is_conflict() => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET /health endpoint.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler for POST /schedule/generate endpoint.
///
/// Runs the engine for a month and returns the result without writing
/// anything.
async fn handle_generate(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GenerateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!(month = %req.month, seed = ?req.seed, "Handling generate request");

    let store = app_state.store.lock().await;
    let response: ScheduleResponse = generate_schedule(store.as_ref(), &req)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST /versions/save endpoint.
///
/// Runs the engine and persists the result under the next draft tag.
async fn handle_save(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveVersionRequest>,
) -> Result<Json<ScheduleResponse>, HttpError> {
    info!(month = %req.month, actor = %req.actor, "Handling save request");

    let mut store = app_state.store.lock().await;
    let response: ScheduleResponse = save_version(store.as_mut(), &req)?;
    drop(store);

    info!(month = %req.month, tag = ?response.tag, "Saved version");

    Ok(Json(response))
}

/// Handler for POST /versions/finalize endpoint.
async fn handle_finalize(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<FinalizeVersionRequest>,
) -> Result<Json<VersionInfo>, HttpError> {
    info!(month = %req.month, tag = ?req.tag, actor = %req.actor, "Handling finalize request");

    let mut store = app_state.store.lock().await;
    let info: VersionInfo = finalize_version(store.as_mut(), &req)?;
    drop(store);

    info!(month = %req.month, "Finalized version");

    Ok(Json(info))
}

/// Handler for POST /versions/delete endpoint.
async fn handle_delete(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DeleteVersionRequest>,
) -> Result<Json<ListVersionsResponse>, HttpError> {
    info!(month = %req.month, tag = %req.tag, actor = %req.actor, "Handling delete request");

    let mut store = app_state.store.lock().await;
    let remaining: ListVersionsResponse = delete_version(store.as_mut(), &req)?;
    drop(store);

    Ok(Json(remaining))
}

/// Handler for GET /versions endpoint.
async fn handle_list_versions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListVersionsQuery>,
) -> Result<Json<ListVersionsResponse>, HttpError> {
    info!(month = %query.month, "Handling list_versions request");

    let request: ListVersionsRequest = ListVersionsRequest { month: query.month };
    let store = app_state.store.lock().await;
    let response: ListVersionsResponse = list_versions(store.as_ref(), &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST /swaps endpoint.
///
/// Applies a batch of swaps to a saved version, the final version
/// included.
async fn handle_apply_swaps(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ApplySwapsRequest>,
) -> Result<Json<ApplySwapsResponse>, HttpError> {
    info!(
        month = %req.month,
        tag = %req.tag,
        count = req.swaps.len(),
        actor = %req.actor,
        "Handling apply_swaps request"
    );

    let mut store = app_state.store.lock().await;
    let response: ApplySwapsResponse = apply_swaps(store.as_mut(), &req)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET /export endpoint.
async fn handle_export(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportScheduleResponse>, HttpError> {
    info!(month = %query.month, tag = %query.tag, table = %query.table, "Handling export request");

    let request: ExportScheduleRequest = ExportScheduleRequest {
        month: query.month,
        tag: query.tag,
        table: query.table,
    };
    let store = app_state.store.lock().await;
    let response: ExportScheduleResponse = export_schedule_csv(store.as_ref(), &request)?;
    drop(store);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/schedule/generate", post(handle_generate))
        .route("/versions/save", post(handle_save))
        .route("/versions/finalize", post(handle_finalize))
        .route("/versions/delete", post(handle_delete))
        .route("/versions", get(handle_list_versions))
        .route("/swaps", post(handle_apply_swaps))
        .route("/export", get(handle_export))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Endo Rota Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: Box<dyn TableStore + Send> = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Box::new(SqliteStore::open(std::path::Path::new(db_path))?)
    } else {
        info!("Using in-memory store");
        Box::new(MemoryStore::new())
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
