//! HTTP routes for the mock division server

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::error::{Result, ServerError};
use crate::fixtures::SharedFixtures;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub divisions: usize,
}

/// Division listing entry
#[derive(Serialize)]
pub struct DivisionSummary {
    pub slug: String,
    pub drivers: usize,
}

async fn health(State(state): State<SharedFixtures>) -> Json<HealthResponse> {
    let fixtures = state.read().await;
    Json(HealthResponse {
        status: "ready".to_string(),
        divisions: fixtures.len(),
    })
}

async fn list_divisions(State(state): State<SharedFixtures>) -> Json<Vec<DivisionSummary>> {
    let fixtures = state.read().await;
    let summaries = fixtures
        .slugs()
        .filter_map(|slug| {
            fixtures.get(slug).map(|f| DivisionSummary {
                slug: slug.to_string(),
                drivers: f.driver_count(),
            })
        })
        .collect();
    Json(summaries)
}

/// Serve one division the way a sheet endpoint would
async fn get_division(
    State(state): State<SharedFixtures>,
    Path(slug): Path<String>,
) -> Result<Response> {
    // Clone out so the lock is not held across the delay
    let fixture = state
        .read()
        .await
        .get(&slug)
        .cloned()
        .ok_or_else(|| ServerError::UnknownDivision(slug.clone()))?;

    if fixture.delay_ms > 0 {
        tokio::time::sleep(fixture.delay()).await;
    }

    tracing::debug!(division = %slug, drivers = fixture.driver_count(), "Serving division");

    if let Some(status) = fixture.status {
        let status = StatusCode::from_u16(status)
            .map_err(|e| ServerError::Internal(format!("Bad fixture status: {}", e)))?;
        return Ok((status, format!("mock failure for {}", slug)).into_response());
    }

    if let Some(message) = fixture.error {
        return Ok(Json(json!({ "error": message })).into_response());
    }

    Ok(Json(fixture.drivers).into_response())
}

/// Create the router with all routes
pub fn create_router(state: SharedFixtures) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/divisions", get(list_divisions))
        .route("/divisions/{slug}", get(get_division))
        .with_state(state)
}
