mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_get_trip_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/not-an-object-id")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid trip id");
}

#[actix_rt::test]
#[serial]
async fn test_create_trip_invalid_user_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips")
        .set_json(&json!({
            "userId": "not-an-object-id",
            "trip_plan": {
                "destination": "Kyoto",
                "duration": "3 Days",
                "origin": "Tokyo",
                "budget": "Moderate",
                "group_size": "Just Me",
                "hotels": [],
                "itinerary": []
            }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid user id");
}

#[actix_rt::test]
#[serial]
async fn test_get_user_trips_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/user/bogus")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_trip_rejects_malformed_plan() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    // Missing required trip_plan fields fails JSON extraction.
    let req = test::TestRequest::post()
        .uri("/api/trips")
        .set_json(&json!({
            "userId": "64b5f0a2e4b0a2a1c8d9e001",
            "trip_plan": { "destination": "Kyoto" }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
