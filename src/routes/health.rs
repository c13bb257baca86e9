use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::db::mongo::DATABASE;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    GET /health
*/
pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_status = match client
        .database(DATABASE)
        .run_command(doc! { "ping": 1 })
        .await
    {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(err) => {
            health.status = "degraded".to_string();
            ServiceStatus {
                status: "error".to_string(),
                details: Some(err.to_string()),
            }
        }
    };
    health.services.insert("mongodb".to_string(), mongo_status);

    // Optional integrations report configured/unconfigured, never an error:
    // the API degrades gracefully without them.
    health.services.insert(
        "model_api".to_string(),
        key_presence_status("GROQ_API_KEY"),
    );
    health.services.insert(
        "photo_search".to_string(),
        key_presence_status("UNSPLASH_ACCESS_KEY"),
    );

    HttpResponse::Ok().json(health)
}

fn key_presence_status(var: &str) -> ServiceStatus {
    match env::var(var) {
        Ok(value) if !value.is_empty() => ServiceStatus {
            status: "configured".to_string(),
            details: None,
        },
        _ => ServiceStatus {
            status: "unconfigured".to_string(),
            details: Some(format!("{} not set", var)),
        },
    }
}
