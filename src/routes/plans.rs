use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde_json::json;
use uuid::Uuid;

use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::stored_plan::{CreatePlanRequest, UpdatePlanRequest};
use crate::models::travel::{ItineraryPlan, TravelPreferences};
use crate::services::plan_service::{PlanStore, PlanStoreError};
use crate::services::plan_validation::{repair_day_costs, validate_plan_value};

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "message": message.into() }))
}

fn store_error(err: PlanStoreError) -> HttpResponse {
    match err {
        PlanStoreError::NotConfigured => {
            HttpResponse::ServiceUnavailable().json(json!({ "message": err.to_string() }))
        }
        PlanStoreError::NotFound => HttpResponse::NotFound().json(json!({ "message": err.to_string() })),
        other => {
            error!("Plan store failure: {}", other);
            HttpResponse::InternalServerError().json(json!({ "message": "Failed to access saved plans" }))
        }
    }
}

/// Validates both halves of a plan submission.
fn checked_submission(
    plan: &serde_json::Value,
    preferences: &TravelPreferences,
) -> Result<ItineraryPlan, HttpResponse> {
    preferences.validate().map_err(|e| bad_request(e.to_string()))?;
    let mut plan = validate_plan_value(plan).map_err(|e| bad_request(e.to_string()))?;
    repair_day_costs(&mut plan);
    Ok(plan)
}

fn parse_plan_id(raw: &str) -> Result<String, HttpResponse> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| bad_request("Invalid plan id"))
}

/*
    GET /api/plans
*/
pub async fn list(user: AuthenticatedUser, store: web::Data<dyn PlanStore>) -> impl Responder {
    match store.list(&user.user_id).await {
        Ok(plans) => HttpResponse::Ok().json(plans),
        Err(err) => store_error(err),
    }
}

/*
    POST /api/plans
*/
pub async fn create(
    user: AuthenticatedUser,
    store: web::Data<dyn PlanStore>,
    input: web::Json<CreatePlanRequest>,
) -> impl Responder {
    let CreatePlanRequest { plan, preferences } = input.into_inner();
    let plan = match checked_submission(&plan, &preferences) {
        Ok(plan) => plan,
        Err(response) => return response,
    };

    match store.create(&user.user_id, plan, preferences).await {
        Ok(stored) => HttpResponse::Created().json(stored),
        Err(err) => store_error(err),
    }
}

/*
    PUT /api/plans/{id}
*/
pub async fn update(
    user: AuthenticatedUser,
    store: web::Data<dyn PlanStore>,
    path: web::Path<String>,
    input: web::Json<UpdatePlanRequest>,
) -> impl Responder {
    let plan_id = match parse_plan_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let (plan, preferences) = match input.into_inner() {
        UpdatePlanRequest {
            plan: Some(plan),
            preferences: Some(preferences),
        } => (plan, preferences),
        _ => return bad_request("plan and preferences are both required"),
    };
    let plan = match checked_submission(&plan, &preferences) {
        Ok(plan) => plan,
        Err(response) => return response,
    };

    match store.update(&user.user_id, &plan_id, plan, preferences).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(err) => store_error(err),
    }
}

/*
    DELETE /api/plans/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    store: web::Data<dyn PlanStore>,
    path: web::Path<String>,
) -> impl Responder {
    let plan_id = match parse_plan_id(&path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match store.delete(&user.user_id, &plan_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => store_error(err),
    }
}
