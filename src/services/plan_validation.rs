//! Schema checks for itinerary plans that arrive from outside the process:
//! language-model output and plans posted back by clients.
//!
//! Numbers may come in as numeric strings (`"120"`) and are coerced. Anything
//! structurally incomplete is rejected with the path of the first offending field.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::travel::{ExpenseCategory, ItineraryActivity, ItineraryDay, ItineraryPlan};
use crate::services::trip_dates::parse_calendar_date;

/// Day totals that round to the activity sum are treated as consistent.
const DAY_COST_TOLERANCE: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum PlanValidationError {
    #[error("{0}: expected an object")]
    NotAnObject(String),
    #[error("{0}: required field is missing")]
    MissingField(String),
    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("{0}: must not be empty")]
    Empty(String),
    #[error("{0}: must not be negative")]
    Negative(String),
    #[error("{0}: expected a YYYY-MM-DD date")]
    InvalidDate(String),
}

type Result<T> = std::result::Result<T, PlanValidationError>;

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| PlanValidationError::NotAnObject(path.to_string()))
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn required_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    let full = format!("{}.{}", path, key);
    match field(obj, key) {
        None => Err(PlanValidationError::MissingField(full)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(PlanValidationError::WrongType {
            path: full,
            expected: "a string",
        }),
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PlanValidationError::WrongType {
            path: format!("{}.{}", path, key),
            expected: "a string",
        }),
    }
}

/// Reads a JSON number, or a string holding one.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn non_negative(value: &Value, path: String) -> Result<f64> {
    let number = coerce_number(value).ok_or_else(|| PlanValidationError::WrongType {
        path: path.clone(),
        expected: "a number",
    })?;
    if number < 0.0 {
        return Err(PlanValidationError::Negative(path));
    }
    Ok(number)
}

fn required_amount(obj: &Map<String, Value>, key: &str, path: &str) -> Result<f64> {
    let full = format!("{}.{}", path, key);
    match field(obj, key) {
        None => Err(PlanValidationError::MissingField(full)),
        Some(value) => non_negative(value, full),
    }
}

fn optional_amount(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<f64>> {
    match field(obj, key) {
        None => Ok(None),
        Some(value) => non_negative(value, format!("{}.{}", path, key)).map(Some),
    }
}

fn non_empty_array<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Vec<Value>> {
    let full = format!("{}.{}", path, key);
    match field(obj, key) {
        None => Err(PlanValidationError::MissingField(full)),
        Some(Value::Array(items)) if items.is_empty() => Err(PlanValidationError::Empty(full)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(PlanValidationError::WrongType {
            path: full,
            expected: "an array",
        }),
    }
}

fn parse_activity(value: &Value, path: &str) -> Result<ItineraryActivity> {
    let obj = as_object(value, path)?;
    Ok(ItineraryActivity {
        time: required_string(obj, "time", path)?,
        title: required_string(obj, "title", path)?,
        description: required_string(obj, "description", path)?,
        location: optional_string(obj, "location", path)?,
        budget: optional_amount(obj, "budget", path)?,
    })
}

fn parse_day(value: &Value, path: &str) -> Result<ItineraryDay> {
    let obj = as_object(value, path)?;

    let date = required_string(obj, "date", path)?;
    if parse_calendar_date(&date).is_none() {
        return Err(PlanValidationError::InvalidDate(format!("{}.date", path)));
    }

    let activities = non_empty_array(obj, "activities", path)?
        .iter()
        .enumerate()
        .map(|(i, activity)| parse_activity(activity, &format!("{}.activities[{}]", path, i)))
        .collect::<Result<Vec<_>>>()?;

    // A bad day total is not fatal; the repair pass recomputes it.
    let estimated_cost = field(obj, "estimatedCost")
        .and_then(coerce_number)
        .filter(|cost| *cost >= 0.0);

    Ok(ItineraryDay {
        date,
        summary: required_string(obj, "summary", path)?,
        activities,
        estimated_cost,
    })
}

fn parse_expense(value: &Value, path: &str) -> Result<ExpenseCategory> {
    let obj = as_object(value, path)?;
    Ok(ExpenseCategory {
        name: required_string(obj, "name", path)?,
        planned: required_amount(obj, "planned", path)?,
        actual: required_amount(obj, "actual", path)?,
    })
}

/// Turns an untrusted JSON document into a plan, or says why it can't.
pub fn validate_plan_value(value: &Value) -> Result<ItineraryPlan> {
    let root = "plan";
    let obj = as_object(value, root)?;

    let days = non_empty_array(obj, "days", root)?
        .iter()
        .enumerate()
        .map(|(i, day)| parse_day(day, &format!("{}.days[{}]", root, i)))
        .collect::<Result<Vec<_>>>()?;

    let expenses = non_empty_array(obj, "expenses", root)?
        .iter()
        .enumerate()
        .map(|(i, expense)| parse_expense(expense, &format!("{}.expenses[{}]", root, i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(ItineraryPlan {
        title: required_string(obj, "title", root)?,
        overview: required_string(obj, "overview", root)?,
        days,
        expenses,
    })
}

/// Makes every day's `estimated_cost` agree with its activities.
///
/// Priced days get the rounded activity sum unless the supplied total is already
/// within rounding of it. Unpriced days carry no total.
pub fn repair_day_costs(plan: &mut ItineraryPlan) {
    for day in plan.days.iter_mut() {
        let supplied = day.estimated_cost.filter(|cost| cost.is_finite() && *cost >= 0.0);
        day.estimated_cost = match (day.activity_budget_total(), supplied) {
            (Some(total), Some(cost)) if (cost - total).abs() <= DAY_COST_TOLERANCE => Some(cost),
            (Some(total), _) => Some(total),
            (None, _) => None,
        };
    }
}
