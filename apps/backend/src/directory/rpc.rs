use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{DirectoryClient, DirectoryContact};
use crate::config::DirectoryConfig;
use crate::error::AppError;

/// The directory model and fields we read. The remote always includes `id`
/// in responses whether or not it is requested.
const CONTACT_MODEL: &str = "res.partner";
const CONTACT_FIELDS: [&str; 3] = ["name", "email", "phone"];

/// JSON-RPC 2.0 client for the remote contact directory.
///
/// `connect` authenticates once and caches the account id; every call has a
/// bounded timeout, and any transport or protocol failure surfaces as a
/// retryable `DirectoryUnavailable`.
pub struct RpcDirectoryClient {
    http: reqwest::Client,
    endpoint: String,
    db: String,
    password: String,
    uid: i64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u32,
}

#[derive(Serialize)]
struct RpcParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    message: String,
}

impl RpcDirectoryClient {
    /// Authenticate against the directory and return a ready client.
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        let endpoint = format!("{}/jsonrpc", config.url.trim_end_matches('/'));

        let uid = call(
            &http,
            &endpoint,
            "common",
            "authenticate",
            json!([config.db, config.user, config.password, {}]),
        )
        .await?;

        // A falsy uid means the directory rejected the credentials.
        let uid = uid.as_i64().filter(|uid| *uid > 0).ok_or_else(|| {
            AppError::directory_unavailable("directory authentication failed".to_string())
        })?;

        debug!(uid, "authenticated against remote directory");

        Ok(Self {
            http,
            endpoint,
            db: config.db.clone(),
            password: config.password.clone(),
            uid,
        })
    }

    async fn execute_kw(&self, method: &str, args: Value) -> Result<Value, AppError> {
        call(
            &self.http,
            &self.endpoint,
            "object",
            "execute_kw",
            json!([
                self.db,
                self.uid,
                self.password,
                CONTACT_MODEL,
                method,
                args,
                { "fields": CONTACT_FIELDS },
            ]),
        )
        .await
    }
}

async fn call(
    http: &reqwest::Client,
    endpoint: &str,
    service: &str,
    method: &str,
    args: Value,
) -> Result<Value, AppError> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        method: "call",
        params: RpcParams {
            service,
            method,
            args,
        },
        id: 1,
    };

    let response = http
        .post(endpoint)
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::directory_unavailable(format!("directory request failed: {e}")))?;

    let body: RpcResponse = response.json().await.map_err(|e| {
        AppError::directory_unavailable(format!("malformed directory response: {e}"))
    })?;

    if let Some(error) = body.error {
        return Err(AppError::directory_unavailable(format!(
            "directory call {service}.{method} failed: {}",
            error.message
        )));
    }

    Ok(body.result.unwrap_or(Value::Null))
}

#[async_trait]
impl DirectoryClient for RpcDirectoryClient {
    async fn fetch_contacts(&self) -> Result<Vec<DirectoryContact>, AppError> {
        // Empty domain selects every record.
        let result = self.execute_kw("search_read", json!([[]])).await?;
        serde_json::from_value(result).map_err(|e| {
            AppError::directory_unavailable(format!("unexpected directory payload: {e}"))
        })
    }

    async fn fetch_contact(&self, id: i64) -> Result<Option<DirectoryContact>, AppError> {
        let result = self.execute_kw("read", json!([[id]])).await?;
        let mut records: Vec<DirectoryContact> = serde_json::from_value(result).map_err(|e| {
            AppError::directory_unavailable(format!("unexpected directory payload: {e}"))
        })?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }
}
