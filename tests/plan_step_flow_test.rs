mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{test, web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use serial_test::serial;

use common::TestApp;

/// Stand-in for the chat-completions endpoint. Replies from a script, one
/// entry per call (the last entry repeats), and records every request body.
struct ModelStub {
    calls: AtomicUsize,
    requests: Mutex<Vec<Value>>,
    script: Vec<&'static str>,
}

async fn stub_completions(
    state: web::Data<Arc<ModelStub>>,
    body: web::Json<Value>,
) -> HttpResponse {
    let call = state.calls.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(body.into_inner());

    let content = state
        .script
        .get(call)
        .or_else(|| state.script.last())
        .copied()
        .unwrap_or_default();

    HttpResponse::Ok().json(json!({
        "choices": [{ "message": { "content": content } }]
    }))
}

/// Binds the stub to an ephemeral port and points MODEL_BASE_URL at it.
async fn spawn_model_stub(script: Vec<&'static str>) -> Arc<ModelStub> {
    let stub = Arc::new(ModelStub {
        calls: AtomicUsize::new(0),
        requests: Mutex::new(Vec::new()),
        script,
    });

    let state = stub.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/chat/completions", web::post().to(stub_completions))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    std::env::set_var("MODEL_BASE_URL", format!("http://{}", addr));
    std::env::set_var("GROQ_API_KEY", "test-credential");

    stub
}

fn collection_request() -> Value {
    json!({
        "messages": [
            { "role": "assistant", "content": "How many people are traveling?", "ui": "groupSize" },
            { "role": "user", "content": "A Couple" },
            { "role": "user", "content": "Let's keep planning" }
        ]
    })
}

#[actix_rt::test]
#[serial]
async fn test_reasked_directive_is_answered_from_memory() {
    // First reply re-asks a question the user already answered; the handler
    // must resubmit the remembered value and return the follow-up instead.
    let stub = spawn_model_stub(vec![
        r#"{"resp": "How many people are traveling?", "ui": "groupSize"}"#,
        r#"{"resp": "What is your budget level?", "ui": "budget"}"#,
    ])
    .await;

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&collection_request())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ui"], "budget");
    assert_eq!(body["resp"], "What is your budget level?");

    assert_eq!(stub.calls.load(Ordering::SeqCst), 2);

    // The second upstream call must end with the remembered answer as a
    // user turn.
    let requests = stub.requests.lock().unwrap();
    let last_turn = requests[1]["messages"].as_array().unwrap().last().unwrap();
    assert_eq!(last_turn["role"], "user");
    assert_eq!(last_turn["content"], "A Couple");
}

#[actix_rt::test]
#[serial]
async fn test_auto_answer_rounds_are_capped() {
    // The model keeps re-asking the answered question. The handler gives up
    // after three resubmission rounds and returns the widget rather than
    // looping.
    let stub = spawn_model_stub(vec![
        r#"{"resp": "How many people are traveling?", "ui": "groupSize"}"#,
    ])
    .await;

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&collection_request())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ui"], "groupSize");

    // One opening call plus three bounded rounds.
    assert_eq!(stub.calls.load(Ordering::SeqCst), 4);
}

#[actix_rt::test]
#[serial]
async fn test_unanswered_directive_passes_through() {
    // No remembered budget answer exists, so the budget widget is returned
    // after a single upstream call.
    let stub = spawn_model_stub(vec![
        r#"{"resp": "What is your budget level?", "ui": "budget"}"#,
    ])
    .await;

    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/plan-generation")
        .set_json(&collection_request())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ui"], "budget");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}
