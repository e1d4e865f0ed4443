use std::time::{Duration, SystemTime};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/live", get(live))
        .route("/info", get(info))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    database_latency_ms: Option<u64>,
    uptime_seconds: u64,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LivenessResponse {
    status: &'static str,
    uptime_seconds: u64,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    service: &'static str,
    version: &'static str,
    start_time: String,
    uptime_seconds: u64,
}

enum DbCheckStatus {
    Connected { latency_ms: u64 },
    Timeout,
    Disconnected,
}

async fn root(State(state): State<AppState>) -> Response {
    let (ok, database, database_latency_ms) = match database_check(&state).await {
        DbCheckStatus::Connected { latency_ms } => (true, "connected", Some(latency_ms)),
        DbCheckStatus::Timeout => (false, "timeout", None),
        DbCheckStatus::Disconnected => (false, "disconnected", None),
    };

    let response = HealthResponse {
        status: if ok { "ok" } else { "degraded" },
        database,
        database_latency_ms,
        uptime_seconds: state.uptime_seconds(),
        timestamp: now_iso(),
    };

    let status_code = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response)).into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    Json(LivenessResponse {
        status: "healthy",
        uptime_seconds: state.uptime_seconds(),
        timestamp: now_iso(),
    })
    .into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    Json(InfoResponse {
        service: "vocab-deck-backend",
        version: env!("CARGO_PKG_VERSION"),
        start_time: system_time_iso(state.started_at_system()),
        uptime_seconds: state.uptime_seconds(),
    })
    .into_response()
}

async fn database_check(state: &AppState) -> DbCheckStatus {
    let proxy = state.db_proxy();
    match tokio::time::timeout(DB_CHECK_TIMEOUT, proxy.ping()).await {
        Ok(Ok(latency)) => DbCheckStatus::Connected {
            latency_ms: latency.as_millis() as u64,
        },
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "database health check failed");
            DbCheckStatus::Disconnected
        }
        Err(_) => DbCheckStatus::Timeout,
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn system_time_iso(value: SystemTime) -> String {
    DateTime::<Utc>::from(value).to_rfc3339_opts(SecondsFormat::Millis, true)
}
