use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_access_token;
use crate::state::app_state::AppState;
use crate::AppError;

/// Authenticated principal extracted from a verified Bearer token.
///
/// The subject claim is trusted as-is; there is no user registry lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub sub: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Extract Authorization header
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .ok_or_else(AppError::unauthorized_missing_bearer)?;

            let auth_value = auth_header
                .to_str()
                .map_err(|_| AppError::unauthorized_missing_bearer())?;

            // Parse "Bearer <token>" format
            let parts: Vec<&str> = auth_value.split_whitespace().collect();
            if parts.len() != 2 || parts[0] != "Bearer" {
                return Err(AppError::unauthorized_missing_bearer());
            }

            let token = parts[1];
            if token.is_empty() {
                return Err(AppError::unauthorized_missing_bearer());
            }

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not found".to_string()))?;

            let claims = verify_access_token(token, &app_state.security)?;

            Ok(CurrentUser { sub: claims.sub })
        })
    }
}
