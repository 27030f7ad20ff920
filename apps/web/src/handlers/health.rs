//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use yatube_core::ports::PostFilter;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status. Storage is probed with a
/// post count.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = match state.posts.count(PostFilter::All).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Storage health probe failed");
            "unavailable"
        }
    };

    let response = HealthResponse {
        status: if storage == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if storage == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
