use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Exchange the demo credential pair for a short-lived bearer token
async fn login(
    form: web::Form<LoginForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if !app_state.credentials.verify(&form.username, &form.password) {
        return Err(AppError::invalid_credentials());
    }

    let token = mint_access_token(&form.username, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/login").route(web::post().to(login)));
}
