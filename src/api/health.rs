use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::database::MongoDb;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

pub async fn health_check(db: web::Data<MongoDb>) -> impl Responder {
    let status = match db.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            log::warn!("Health check store ping failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        service: "secrets-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
