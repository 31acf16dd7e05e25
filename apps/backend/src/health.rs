use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::app_state::AppState;

/// Liveness probe
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Contacts Mirror API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Detailed health: probes the mirror and reports which configuration
/// groups are present. Degraded state is reported in the body, never as a
/// failed request.
async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let database = match app_state.db.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {e}"),
    };

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "database": database,
        "environment": {
            "has_directory_config": app_state.directory.is_some(),
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
