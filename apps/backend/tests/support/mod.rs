#![allow(dead_code)]

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use backend::entities::contacts;
use backend::{AppState, SecurityConfig, StaticPair};

/// Test service with the production route set, without the production
/// binary's bind/TLS concerns.
pub async fn build_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(backend::routes::configure),
    )
    .await
}

pub const JWT_SECRET: &str = "test_jwt_secret_for_integration_tests";
pub const HMAC_SECRET: &str = "test_hmac_secret_for_integration_tests";

/// Fresh in-memory SQLite mirror with the schema applied.
///
/// One pooled connection: an in-memory database exists per connection, so
/// the pool must never hand out a second one.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(JWT_SECRET.as_bytes(), HMAC_SECRET.as_bytes())
}

pub async fn test_state() -> AppState {
    AppState::with_parts(
        test_db().await,
        test_security(),
        Arc::new(StaticPair::new("admin", "admin")),
        None,
    )
}

pub async fn seed_contacts(
    db: &DatabaseConnection,
    rows: &[(i64, Option<&str>, Option<&str>, Option<&str>)],
) {
    for (id, name, email, phone) in rows {
        contacts::ActiveModel {
            id: Set(*id),
            name: Set(name.map(str::to_string)),
            email: Set(email.map(str::to_string)),
            phone: Set(phone.map(str::to_string)),
        }
        .insert(db)
        .await
        .expect("seed contact");
    }
}

pub fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("wall clock before epoch")
        .as_secs() as i64
}

/// `(X-Timestamp, X-Signature)` values for a bodyless GET of `path`,
/// signed at `timestamp` with the test HMAC secret.
pub fn signature_headers(path: &str, timestamp: i64) -> (String, String) {
    let signature = backend::auth::signature::sign(
        HMAC_SECRET.as_bytes(),
        "GET",
        path,
        timestamp,
        b"",
    );
    (timestamp.to_string(), signature)
}
