use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::models::travel::TravelPreferences;
use crate::services::itinerary_generation_service::ItineraryGenerator;

#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    pub preferences: TravelPreferences,
}

/*
    POST /api/itinerary
*/
pub async fn generate(
    generator: web::Data<ItineraryGenerator>,
    input: web::Json<ItineraryRequest>,
) -> impl Responder {
    let preferences = input.into_inner().preferences;

    if let Err(err) = preferences.validate() {
        return HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
    }

    info!(
        "Generating itinerary for {} ({} traveler(s))",
        preferences.destination, preferences.travelers
    );
    let plan = generator.generate_itinerary(&preferences).await;
    HttpResponse::Ok().json(plan)
}
