// Integration tests for the protected read path: both auth factors must
// pass before the mirror is served.

mod support;

use std::time::SystemTime;

use actix_web::test;
use backend::mint_access_token;

use crate::support::{build_app, now_epoch, seed_contacts, signature_headers};

const SEED: [(i64, Option<&str>, Option<&str>, Option<&str>); 2] = [
    (1, Some("Alice"), Some("alice@example.com"), None),
    (2, Some("Bob"), None, Some("555-0100")),
];

async fn seeded_state() -> backend::AppState {
    let state = support::test_state().await;
    seed_contacts(&state.db, &SEED).await;
    state
}

fn bearer(state: &backend::AppState) -> String {
    let token = mint_access_token("admin", SystemTime::now(), &state.security)
        .expect("mint access token");
    format!("Bearer {token}")
}

#[actix_web::test]
async fn test_full_round_trip_via_login() {
    let state = seeded_state().await;
    let app = build_app(state).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_form([("username", "admin"), ("password", "admin")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().expect("token").to_string();

    let (ts, sig) = signature_headers("/contacts", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let mut body: Vec<serde_json::Value> = test::read_body_json(resp).await;
    // Order is unspecified; compare as a set.
    body.sort_by_key(|row| row["id"].as_i64());
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["name"], "Alice");
    assert_eq!(body[0]["phone"], serde_json::Value::Null);
    assert_eq!(body[1]["id"], 2);
    assert_eq!(body[1]["email"], serde_json::Value::Null);
}

#[actix_web::test]
async fn test_missing_signature_headers_is_forbidden() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MISSING_SIGNATURE_HEADERS");
}

#[actix_web::test]
async fn test_stale_timestamp_is_forbidden() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    // Correctly signed, but 400 seconds old: outside the ±300 s window.
    let (ts, sig) = signature_headers("/contacts", now_epoch() - 400);
    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("Authorization", auth))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "SIGNATURE_EXPIRED");
}

#[actix_web::test]
async fn test_malformed_timestamp_is_forbidden() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("Authorization", auth))
        .insert_header(("X-Timestamp", "yesterday"))
        .insert_header(("X-Signature", "deadbeef"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MALFORMED_TIMESTAMP");
}

#[actix_web::test]
async fn test_signature_over_wrong_path_is_forbidden() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    let (ts, sig) = signature_headers("/contacts", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts/2")
        .insert_header(("Authorization", auth))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_SIGNATURE");
}

#[actix_web::test]
async fn test_garbage_token_with_valid_signature_is_unauthorized() {
    let state = seeded_state().await;
    let app = build_app(state).await;

    let (ts, sig) = signature_headers("/contacts", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_INVALID_JWT");
}

#[actix_web::test]
async fn test_missing_bearer_with_valid_signature_is_unauthorized() {
    let state = seeded_state().await;
    let app = build_app(state).await;

    let (ts, sig) = signature_headers("/contacts", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts")
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn test_get_contact_by_id() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    // The signature covers the path including the literal id segment.
    let (ts, sig) = signature_headers("/contacts/2", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts/2")
        .insert_header(("Authorization", auth))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Bob");
    assert_eq!(body["phone"], "555-0100");
}

#[actix_web::test]
async fn test_get_absent_contact_is_not_found() {
    let state = seeded_state().await;
    let auth = bearer(&state);
    let app = build_app(state).await;

    let (ts, sig) = signature_headers("/contacts/999999", now_epoch());
    let req = test::TestRequest::get()
        .uri("/contacts/999999")
        .insert_header(("Authorization", auth))
        .insert_header(("X-Timestamp", ts))
        .insert_header(("X-Signature", sig))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "CONTACT_NOT_FOUND");
}
