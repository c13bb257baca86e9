use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use tripsage_api::db::mongo::create_mongo_client;
use tripsage_api::routes;

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = create_mongo_client(&mongo_uri).await;

        Self { client }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route(
                        "/plan-generation",
                        web::post().to(routes::plan::plan_generation),
                    )
                    .route(
                        "/freeform-plan",
                        web::post().to(routes::freeform::freeform_plan),
                    )
                    .route("/contact", web::post().to(routes::contact::submit_contact))
                    .route("/users", web::post().to(routes::user::get_or_create_user))
                    .service(
                        web::scope("/trips")
                            .route("", web::post().to(routes::trip::create_trip))
                            .route(
                                "/user/{user_id}",
                                web::get().to(routes::trip::get_user_trips),
                            )
                            .route(
                                "/destination/{destination}",
                                web::get().to(routes::trip::get_trips_by_destination),
                            )
                            .route("/{id}", web::get().to(routes::trip::get_trip_by_id)),
                    ),
            )
    }
}

/// Clears the model credential so tests exercise the degraded paths
/// deterministically.
pub fn clear_model_credentials() {
    std::env::remove_var("GROQ_API_KEY");
}
