use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::oid::ObjectId, Client};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::models::trip::TripPlan;
use crate::services::trip_service::TripService;

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub trip_plan: TripPlan,
}

/*
    POST /api/trips
*/
pub async fn create_trip(
    data: web::Data<Arc<Client>>,
    input: web::Json<CreateTripRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let user_id = match ObjectId::parse_str(&request.user_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid user id" }));
        }
    };

    let service = TripService::new(data.get_ref().clone());
    match service.create_trip(&request.trip_plan, user_id).await {
        Ok(trip_id) => HttpResponse::Ok().json(json!({ "tripId": trip_id.to_hex() })),
        Err(err) => {
            eprintln!("Failed to save trip: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save trip" }))
        }
    }
}

/*
    GET /api/trips/{id}
*/
pub async fn get_trip_by_id(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid trip id" }));
        }
    };

    let service = TripService::new(data.get_ref().clone());
    match service.get_trip_by_id(trip_id).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Trip not found" })),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to retrieve trip" }))
        }
    }
}

/*
    GET /api/trips/user/{user_id}
*/
pub async fn get_user_trips(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let user_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid user id" }));
        }
    };

    let service = TripService::new(data.get_ref().clone());
    match service.get_user_trips(user_id).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(err) => {
            eprintln!("Failed to retrieve user trips: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to retrieve trips" }))
        }
    }
}

/*
    GET /api/trips/destination/{destination}
*/
pub async fn get_trips_by_destination(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let destination = path.into_inner();
    if destination.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Destination is required" }));
    }

    let service = TripService::new(data.get_ref().clone());
    match service.get_trips_by_destination(&destination).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(err) => {
            eprintln!("Failed to retrieve trips for {}: {:?}", destination, err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to retrieve trips" }))
        }
    }
}
