use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::credentials::{CredentialStore, StaticPair};
use crate::config::{AppConfig, DirectoryConfig};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection for the contact mirror
    pub db: DatabaseConnection,
    /// Security configuration: JWT and HMAC settings
    pub security: SecurityConfig,
    /// Login credential check (pluggable; a single static pair today)
    pub credentials: Arc<dyn CredentialStore>,
    /// Remote directory settings, absent when running mirror-only
    pub directory: Option<DirectoryConfig>,
}

impl AppState {
    /// Create a new AppState from a connected database and loaded configuration
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            db,
            security: config.security.clone(),
            credentials: Arc::new(StaticPair::new(
                &config.admin_username,
                &config.admin_password,
            )),
            directory: config.directory.clone(),
        }
    }

    /// Create an AppState with explicit parts, bypassing AppConfig (for testing)
    pub fn with_parts(
        db: DatabaseConnection,
        security: SecurityConfig,
        credentials: Arc<dyn CredentialStore>,
        directory: Option<DirectoryConfig>,
    ) -> Self {
        Self {
            db,
            security,
            credentials,
            directory,
        }
    }
}
