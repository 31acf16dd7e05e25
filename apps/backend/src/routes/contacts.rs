use actix_web::{web, HttpResponse, Result};
use tracing::debug;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::signed_request::SignedRequest;
use crate::services::contacts;
use crate::state::app_state::AppState;

/// List the mirrored contacts. Both auth factors must pass: a valid bearer
/// token and an HMAC signature over this request.
async fn list_contacts(
    _signed: SignedRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!(sub = %current_user.sub, "listing contacts");
    let rows = contacts::list_contacts(&app_state.db).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Fetch one mirrored contact by its directory id.
async fn get_contact(
    path: web::Path<i64>,
    _signed: SignedRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    debug!(sub = %current_user.sub, id, "fetching contact");
    let row = contacts::get_contact(&app_state.db, id).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/contacts").route(web::get().to(list_contacts)))
        .service(web::resource("/contacts/{id}").route(web::get().to(get_contact)));
}
