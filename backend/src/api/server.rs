//! HTTP server for the lead import/export API.
//!
//! # API Endpoints
//!
//! | Method | Path                | Description                        |
//! |--------|---------------------|------------------------------------|
//! | GET    | `/health`           | Health check                       |
//! | POST   | `/api/leads/import` | Upload CSV/Excel lead file         |
//! | GET    | `/api/leads/export` | Download leads as CSV/Excel        |
//! | GET    | `/api/logs`         | SSE stream for real-time logs      |

use axum::{
    extract::{Multipart, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::LOG_BROADCASTER;
use super::types::{error_response, error_response_with_details, ImportResponse};
use crate::error::{ExportError, ImportError};
use crate::format::Format;
use crate::pipeline::{export_batch, import_batch};
use crate::storage::SqliteLeadStore;

type ApiError = (StatusCode, Json<Value>);

/// Start the HTTP server on the given port.
pub async fn start_server(
    port: u16,
    store: SqliteLeadStore,
) -> Result<(), Box<dyn std::error::Error>> {
    // permissive CORS for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/leads/import", post(import_leads))
        .route("/api/leads/export", get(export_leads))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(Arc::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Leadport server running on http://localhost:{}", port);
    println!("   POST /api/leads/import - Upload lead file (csv/excel)");
    println!("   GET  /api/leads/export - Download leads");
    println!("   GET  /api/logs         - SSE log stream");
    println!("   GET  /health           - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "leadport",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "import": "POST /api/leads/import",
            "export": "GET /api/leads/export?format=csv|excel&userId=...",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload endpoint: multipart fields `file`, `format`, `userId`.
async fn import_leads(
    State(store): State<Arc<SqliteLeadStore>>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut format_field: Option<String> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        bad_request(&format!("Multipart error: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(&format!("Read error: {}", e)))?;
                file_data = Some(bytes.to_vec());
            }
            "format" => {
                format_field = Some(field.text().await.unwrap_or_default());
            }
            "userId" => {
                user_id = Some(field.text().await.unwrap_or_default());
            }
            _ => {}
        }
    }

    let user_id = match user_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(bad_request("User ID is required")),
    };
    let bytes = match file_data {
        Some(b) if !b.is_empty() => b,
        _ => return Err(bad_request("File data is required")),
    };
    let format: Format = format_field
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|_| bad_request("Invalid format. Use csv or excel"))?;

    println!(
        "📄 NEW IMPORT: {} ({} bytes, {})",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len(),
        format
    );

    let report = import_batch(store.as_ref(), &bytes, format, &user_id)
        .await
        .map_err(|e| match e {
            ImportError::MissingUserId | ImportError::MissingPayload => {
                bad_request(&e.to_string())
            }
            ImportError::Decode(_) | ImportError::Storage(_) => {
                eprintln!("❌ Import error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_response_with_details(
                        "Failed to import data",
                        &e.to_string(),
                    )),
                )
            }
        })?;

    Ok(Json(ImportResponse::from(report)))
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    format: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// Download endpoint: query parameters `format`, `userId`.
async fn export_leads(
    State(store): State<Arc<SqliteLeadStore>>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = match params.user_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(bad_request("User ID is required")),
    };
    let format: Format = params
        .format
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|_| bad_request("Invalid format. Use csv or excel"))?;

    let payload = export_batch(store.as_ref(), &user_id, format)
        .await
        .map_err(|e| match e {
            ExportError::MissingUserId => bad_request(&e.to_string()),
            ExportError::Storage(_) | ExportError::Encode(_) => {
                eprintln!("❌ Export error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_response("Failed to export data")),
                )
            }
        })?;

    let headers = [
        (header::CONTENT_TYPE, payload.mime_type),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", payload.filename),
        ),
    ];
    Ok((headers, payload.bytes))
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(error_response(message)))
}
