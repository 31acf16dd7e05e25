use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// The remote-directory credential group. All four must be present
/// together; a partial group is a configuration error.
pub const DIRECTORY_ENV_VARS: [&str; 4] = [
    "DIRECTORY_URL",
    "DIRECTORY_DB",
    "DIRECTORY_USER",
    "DIRECTORY_PASSWORD",
];

const DEFAULT_DATABASE_URL: &str = "sqlite://contacts.db?mode=rwc";
const DEFAULT_DIRECTORY_TIMEOUT_SECS: u64 = 30;

/// Immutable application configuration, constructed once at process start
/// and injected into every component that needs it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub security: SecurityConfig,
    pub admin_username: String,
    pub admin_password: String,
    pub directory: Option<DirectoryConfig>,
}

/// Connection settings for the remote contact directory.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub url: String,
    pub db: String,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Security settings fall back to demo defaults; the directory group is
    /// optional as a whole but fails fast when only partially present.
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-jwt".to_string());
        let hmac_secret = env::var("HMAC_SECRET").unwrap_or_else(|_| "change-me-hmac".to_string());
        let expire_minutes = int_var("JWT_EXPIRE_MINUTES", 60)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            security: SecurityConfig::new(jwt_secret, hmac_secret)
                .with_expire_minutes(expire_minutes),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string()),
            directory: directory_from_env()?,
        })
    }
}

/// Read the remote-directory credential group.
///
/// Returns `Ok(None)` when the whole group is absent (mirror-only mode) and
/// an error naming exactly the missing variables when the group is partial.
fn directory_from_env() -> Result<Option<DirectoryConfig>, AppError> {
    let values: Vec<Option<String>> = DIRECTORY_ENV_VARS
        .iter()
        .map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
        .collect();

    if values.iter().all(Option::is_none) {
        return Ok(None);
    }

    let missing: Vec<&str> = DIRECTORY_ENV_VARS
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::missing_config(&missing));
    }

    let mut values = values.into_iter().flatten();
    let timeout_secs = int_var(
        "DIRECTORY_TIMEOUT_SECS",
        DEFAULT_DIRECTORY_TIMEOUT_SECS as i64,
    )?;

    Ok(Some(DirectoryConfig {
        url: values.next().unwrap_or_default(),
        db: values.next().unwrap_or_default(),
        user: values.next().unwrap_or_default(),
        password: values.next().unwrap_or_default(),
        timeout: Duration::from_secs(timeout_secs.max(1) as u64),
    }))
}

/// Get an integer environment variable with a default
fn int_var(name: &str, default: i64) -> Result<i64, AppError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' must be an integer, got: '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
