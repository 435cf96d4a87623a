pub mod expenses;
pub mod health;
pub mod itinerary;
pub mod plans;

use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::middleware::auth::AuthMiddleware;

const JSON_LIMIT_BYTES: usize = 1024 * 1024;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
            InternalError::from_response(err, response).into()
        })
}

/// JSON 404 for anything no route matched. Register with `App::default_service`.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Route not found", "path": req.path() }))
}

/// Mounts every route. Expects `ItineraryGenerator`, `dyn PlanStore`,
/// `dyn IdentityProvider` and `HealthContext` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(|| async { "OK" }))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/itinerary", web::post().to(itinerary::generate))
                .route("/expenses", web::post().to(expenses::record))
                // Protected routes
                .service(
                    web::scope("/plans")
                        .wrap(AuthMiddleware)
                        .route("", web::get().to(plans::list))
                        .route("", web::post().to(plans::create))
                        .route("/{id}", web::put().to(plans::update))
                        .route("/{id}", web::delete().to(plans::delete)),
                ),
        );
}
