use actix_web::{web, HttpResponse, Result};

use crate::config::DIRECTORY_ENV_VARS;
use crate::directory::{DirectoryClient, RpcDirectoryClient};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Diagnostic passthrough: fetch contacts live from the remote directory,
/// bypassing the mirror. Deliberately unauthenticated and outside the
/// HMAC trust boundary.
async fn fetched(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let config = app_state
        .directory
        .as_ref()
        .ok_or_else(|| AppError::missing_config(&DIRECTORY_ENV_VARS))?;

    let client = RpcDirectoryClient::connect(config).await?;
    let records = client.fetch_contacts().await?;
    Ok(HttpResponse::Ok().json(records))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/fetched").route(web::get().to(fetched)));
}
