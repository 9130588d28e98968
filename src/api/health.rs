use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tracing::error;

use crate::db::store::JobStore;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn probe(store: &dyn JobStore, up: &str, down: &str) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: up.to_string(),
            database: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("Health probe failed ({}): {:?}", down, e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: down.to_string(),
                database: "disconnected".to_string(),
                error: Some(format!("Database unavailable: {}", e)),
            })
        }
    }
}

/// General health check including store connectivity.
/// Use for load balancers and uptime monitors.
#[get("/health")]
async fn health_check(store: web::Data<dyn JobStore>) -> impl Responder {
    probe(store.get_ref(), "healthy", "unhealthy").await
}

/// Readiness check for Kubernetes readiness probes.
///
/// Returns 503 while the store is unreachable; the process recovers on its own.
#[get("/ready")]
async fn readiness_check(store: web::Data<dyn JobStore>) -> impl Responder {
    probe(store.get_ref(), "ready", "not_ready").await
}

/// Liveness check. Does not touch the store.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        database: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
