use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::json;

use crate::models::expense::ExpenseRecord;

/*
    POST /api/expenses
*/
pub async fn record(input: web::Json<ExpenseRecord>) -> impl Responder {
    let expense = input.into_inner();

    if let Err(err) = expense.validate() {
        return HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
    }

    info!(
        "Expense recorded for itinerary {}: {} {} ({})",
        expense.itinerary_id, expense.amount, expense.currency, expense.category
    );
    HttpResponse::Created().json(json!({ "message": "Expense recorded", "expense": expense }))
}
