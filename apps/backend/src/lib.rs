#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod health;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use auth::credentials::{CredentialStore, StaticPair};
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use auth::signature::REPLAY_WINDOW_SECS;
pub use config::AppConfig;
pub use db::connect_db;
pub use directory::{DirectoryClient, DirectoryContact, RpcDirectoryClient};
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use extractors::signed_request::SignedRequest;
pub use services::sync::{synchronize, SyncReport};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
