mod support;

use actix_web::test;

use crate::support::build_app;

#[actix_web::test]
async fn test_root_reports_ok() {
    let state = support::test_state().await;
    let app = build_app(state).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_health_reports_database_state() {
    let state = support::test_state().await;
    let app = build_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["environment"]["has_directory_config"], false);
}
