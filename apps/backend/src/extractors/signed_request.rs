use std::time::SystemTime;

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::auth::signature;
use crate::state::app_state::AppState;
use crate::AppError;

const TIMESTAMP_HEADER: &str = "X-Timestamp";
const SIGNATURE_HEADER: &str = "X-Signature";

/// HMAC-verified request.
///
/// Captures the raw body bytes before any body parsing and verifies the
/// `X-Timestamp`/`X-Signature` headers against the request's method, path
/// and those exact bytes. Handlers that need the body must read it from
/// here rather than re-extracting it.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub body: web::Bytes,
}

impl FromRequest for SignedRequest {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        // Take the raw payload now; the signature covers the bytes as
        // transmitted, never a re-serialized form.
        let body_fut = web::Bytes::from_request(req, payload);
        let req = req.clone();

        Box::pin(async move {
            let body = body_fut
                .await
                .map_err(|e| AppError::internal(format!("Failed to read request body: {e}")))?;

            let headers = req.headers();
            let (Some(timestamp), Some(signature_hex)) = (
                headers.get(TIMESTAMP_HEADER),
                headers.get(SIGNATURE_HEADER),
            ) else {
                return Err(AppError::forbidden_missing_signature());
            };

            let timestamp = timestamp
                .to_str()
                .map_err(|_| AppError::forbidden_malformed_timestamp())?;
            let signature_hex = signature_hex
                .to_str()
                .map_err(|_| AppError::forbidden_invalid_signature())?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not found".to_string()))?;

            signature::verify(
                &app_state.security.hmac_secret,
                req.method().as_str(),
                req.path(),
                timestamp,
                signature_hex,
                &body,
                SystemTime::now(),
            )?;

            Ok(SignedRequest { body })
        })
    }
}
