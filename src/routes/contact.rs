use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/*
    POST /api/contact

    Delivery is a stub: submissions are logged, not forwarded anywhere.
*/
pub async fn submit_contact(input: web::Json<ContactRequest>) -> impl Responder {
    let form = input.into_inner();

    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.subject.trim().is_empty()
        || form.message.trim().is_empty()
    {
        return HttpResponse::BadRequest().json(json!({ "error": "Missing required fields" }));
    }

    log::info!(
        "Contact form submission: name={} email={} subject={}",
        form.name,
        form.email,
        form.subject
    );

    HttpResponse::Ok().json(json!({ "ok": true }))
}
