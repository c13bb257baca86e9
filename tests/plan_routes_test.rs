mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_plan_generation_empty_messages() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&json!({
            "messages": [],
            "isFinal": false
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid or empty messages array");
}

#[actix_rt::test]
#[serial]
async fn test_plan_generation_missing_messages_field() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&json!({ "isFinal": false }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_plan_generation_without_model_credential() {
    common::clear_model_credentials();

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&json!({
            "messages": [{ "role": "user", "content": "Plan me a trip" }],
            "isFinal": false
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("GROQ_API_KEY"));
}

#[actix_rt::test]
#[serial]
async fn test_freeform_plan_requires_prompt() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/freeform-plan")
        .set_json(&json!({ "prompt": "   " }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Prompt is required");
}

#[actix_rt::test]
#[serial]
async fn test_freeform_plan_mocks_without_credential() {
    common::clear_model_credentials();

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/freeform-plan")
        .set_json(&json!({ "prompt": "weekend in Lisbon" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let plan = body["plan"].as_str().unwrap();
    assert!(plan.contains("Trip Plan (Mock)"));
    assert!(plan.contains("weekend in Lisbon"));
}
