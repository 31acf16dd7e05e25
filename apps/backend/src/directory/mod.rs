//! Client-side boundary to the remote contact directory.
//!
//! The directory is the system of record; everything that crosses this
//! boundary is normalized here, so the rest of the crate only ever sees
//! proper optional fields.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

pub mod rpc;

pub use rpc::RpcDirectoryClient;

/// A contact record as reported by the remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryContact {
    pub id: i64,
    #[serde(default, deserialize_with = "falsy_optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy_optional")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "falsy_optional")]
    pub phone: Option<String>,
}

/// The remote encodes an absent optional field as JSON `false` instead of
/// null. Map the sentinel to `None` at ingestion so it never leaks inward.
fn falsy_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        other => Err(serde::de::Error::custom(format!(
            "expected string, false or null, got {other}"
        ))),
    }
}

/// The remote contact directory, reduced to the two calls this service
/// makes. Implementations own their transport, timeouts included.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the complete remote contact set.
    async fn fetch_contacts(&self) -> Result<Vec<DirectoryContact>, AppError>;

    /// Fetch a single contact by its directory id.
    async fn fetch_contact(&self, id: i64) -> Result<Option<DirectoryContact>, AppError>;
}
