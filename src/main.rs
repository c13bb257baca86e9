use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripsage_api::{db, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route(
                        "/plan-generation",
                        web::post().to(routes::plan::plan_generation),
                    )
                    .route("/freeform-plan", web::post().to(routes::freeform::freeform_plan))
                    .route("/contact", web::post().to(routes::contact::submit_contact))
                    .route("/users", web::post().to(routes::user::get_or_create_user))
                    .service(
                        web::scope("/trips")
                            .route("", web::post().to(routes::trip::create_trip))
                            .route("/user/{user_id}", web::get().to(routes::trip::get_user_trips))
                            .route(
                                "/destination/{destination}",
                                web::get().to(routes::trip::get_trips_by_destination),
                            )
                            .route("/{id}", web::get().to(routes::trip::get_trip_by_id)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
