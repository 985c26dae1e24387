// main.rs
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::JsonConfig;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

mod analytics;
mod controllers;
mod db;
mod error;
mod models;
mod reviews;
mod stores;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting up...");

    let state = match db::establish_connection().await {
        Ok(state) => state,
        Err(e) => {
            log::error!("failed to initialize the database connection: {:?}", e);
            std::process::exit(1);
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let allowed_origin =
        std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(3600);

        let json_config = JsonConfig::default()
            .limit(64 * 1024) // feedback payloads are small
            .error_handler(|err, _req| {
                log::error!("JSON payload error: {}", err);
                actix_web::error::ErrorBadRequest(format!("Payload error: {}", err))
            });

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config)
            .wrap(cors)
            .wrap(Logger::default())
            //subject_controller
            .service(controllers::subject_controller::get_subjects)
            .service(controllers::subject_controller::get_subject_by_id)
            //feedback_controller
            .service(controllers::feedback_controller::submit_rating)
            .service(controllers::feedback_controller::submit_review)
            .service(controllers::feedback_controller::get_user_feedback)
            //analytics_controller
            .service(controllers::analytics_controller::get_subject_analytics)
            //review_controller
            .service(controllers::review_controller::get_reviews)
    })
    .bind(bind_addr)?
    .run()
    .await
}
