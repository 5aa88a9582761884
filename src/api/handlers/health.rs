use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use sqlx::{Connection, PgPool, Row};
use tracing::{error, info_span, Instrument};

use crate::api::GIT_COMMIT_HASH;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Database is reachable"),
        (status = 500, description = "Database is unreachable"),
    ),
    tag = "health"
)]
// axum handler for health
pub async fn health(pool: Extension<PgPool>) -> Response {
    let headers = app_headers();

    match probe_database(&pool).await {
        Ok((db, server_time)) => (
            StatusCode::OK,
            headers,
            Json(json!({
                "ok": true,
                "db": db,
                "serverTime": server_time,
            })),
        )
            .into_response(),
        Err(err) => {
            error!("Database health check failed: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                headers,
                Json(json!({
                    "ok": false,
                    "error": err.to_string(),
                    "hint": "Check the database DSN, credentials, and network reachability",
                })),
            )
                .into_response()
        }
    }
}

async fn probe_database(pool: &PgPool) -> Result<(String, String)> {
    let acquire_span = info_span!(
        "db.acquire",
        db.system = "postgresql",
        db.operation = "ACQUIRE"
    );
    let mut conn = pool
        .acquire()
        .instrument(acquire_span)
        .await
        .context("Failed to acquire database connection")?;

    let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
    conn.ping()
        .instrument(ping_span)
        .await
        .context("Failed to ping database")?;

    let query = r#"
        SELECT
            current_database() AS db,
            to_char(now() AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS server_time
    "#;
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .fetch_one(&mut *conn)
        .instrument(span)
        .await
        .context("Failed to read server status")?;

    Ok((row.get("db"), row.get("server_time")))
}

fn app_headers() -> HeaderMap {
    let short_hash = if GIT_COMMIT_HASH.len() > 7 {
        &GIT_COMMIT_HASH[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )
    .parse()
    {
        headers.insert("X-App", value);
    }

    headers
}
