mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod session;
mod utils;
mod views;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Starting Secrets Service...");

    let db = match database::MongoDb::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("MongoDB connected successfully");

    let bind_addr = format!("{}:{}", config.host, config.port);
    log::info!("Server starting on {}", bind_addr);

    let db_data = web::Data::new(db);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(db_data.clone())
            .app_data(config_data.clone())
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Landing and static pages
            .route("/", web::get().to(api::pages::home))
            .route("/about", web::get().to(api::pages::about))
            .route("/contact", web::get().to(api::pages::contact))
            .route("/error", web::get().to(api::pages::error_page))
            // Local accounts
            .route("/register", web::get().to(api::auth::show_register))
            .route("/register", web::post().to(api::auth::register))
            .route("/login", web::get().to(api::auth::show_login))
            .route("/login", web::post().to(api::auth::login))
            .route("/logout", web::get().to(api::auth::logout))
            // Google OAuth
            .route("/auth/google", web::get().to(api::auth::google_begin))
            .route(
                "/auth/google/secrets",
                web::get().to(api::auth::google_callback),
            )
            // Secrets
            .route("/secrets", web::get().to(api::secrets::secrets))
            .route("/submit", web::get().to(api::secrets::show_submit))
            .route("/submit", web::post().to(api::secrets::submit))
            // Health check
            .route("/health", web::get().to(api::health::health_check))
    })
    .bind(bind_addr)?
    .run()
    .await
}
