use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::models::user::UserIdentity;
use crate::services::trip_service::TripService;

/*
    POST /api/users
*/
pub async fn get_or_create_user(
    data: web::Data<Arc<Client>>,
    input: web::Json<UserIdentity>,
) -> impl Responder {
    let identity = input.into_inner();

    if !is_valid_email(&identity.email) {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid email address" }));
    }
    if identity.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Name is required" }));
    }

    let service = TripService::new(data.get_ref().clone());
    match service.get_or_create_user(identity).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => {
            eprintln!("Failed to get or create user: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create user" }))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    return re.unwrap().is_match(email);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("traveler@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }
}
