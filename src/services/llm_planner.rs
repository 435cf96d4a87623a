use std::{sync::Arc, sync::OnceLock, time::Duration};

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;
use serde_json::json;
use thiserror::Error;

use crate::models::travel::{ItineraryPlan, TravelPreferences};
use crate::services::llm_client::{ChatMessage, CompletionClient, CompletionError};
use crate::services::plan_validation::{repair_day_costs, validate_plan_value, PlanValidationError};
use crate::services::trip_dates::resolve_trip_window;

const SYSTEM_PROMPT: &str = "You are an experienced travel planner. \
Reply with a single valid JSON object and nothing else: no prose, no markdown, no code fences. \
Keep every cost realistic for the destination and expressed as a plain number in the traveler's currency. \
Give each activity a budget where it costs money so that every day's estimatedCost can be derived \
from its activities. Use exactly the dates listed in dateSequence, one day per date, in order.";

/// Shape the model is asked to fill, mirrored from `ItineraryPlan`.
fn response_schema() -> serde_json::Value {
    json!({
        "title": "string",
        "overview": "string",
        "days": [{
            "date": "YYYY-MM-DD (from dateSequence)",
            "summary": "string",
            "activities": [{
                "time": "string, e.g. Morning / Afternoon / Evening",
                "title": "string",
                "description": "string",
                "location": "string (optional)",
                "budget": "number >= 0 (optional)"
            }],
            "estimatedCost": "number >= 0, sum of the day's activity budgets"
        }],
        "expenses": [{
            "name": "transport | lodging | food | activities",
            "planned": "number >= 0",
            "actual": "number >= 0"
        }]
    })
}

#[derive(Debug, Error)]
pub enum LlmPlanError {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("response does not match the plan schema: {0}")]
    Schema(#[from] PlanValidationError),
}

/// System instruction plus a user payload carrying the preferences, the exact
/// dates to use and the expected response shape.
pub fn build_plan_messages(preferences: &TravelPreferences, now: DateTime<Utc>) -> Vec<ChatMessage> {
    let window = resolve_trip_window(preferences, now);
    let payload = json!({
        "task": "Create a day-by-day travel itinerary for these preferences.",
        "preferences": preferences,
        "dayCount": window.day_count,
        "dateSequence": window.date_sequence(),
        "responseSchema": response_schema(),
    });

    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(payload.to_string()),
    ]
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\r?\n?```$").expect("fence pattern is valid")
    })
}

/// Drops a surrounding ```json ... ``` fence if there is one; otherwise just trims.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match code_fence().captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Parse, validate and repair raw model output.
pub fn parse_plan_response(raw: &str) -> Result<ItineraryPlan, LlmPlanError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw))?;
    let mut plan = validate_plan_value(&value)?;
    repair_day_costs(&mut plan);
    Ok(plan)
}

/// Asks a language model for a plan and only hands back one that passed validation.
pub struct LlmPlanner {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl LlmPlanner {
    pub fn new(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn request_plan(
        &self,
        preferences: &TravelPreferences,
        now: DateTime<Utc>,
    ) -> Result<ItineraryPlan, LlmPlanError> {
        let messages = build_plan_messages(preferences, now);

        let raw = tokio::time::timeout(self.timeout, self.client.complete(&messages))
            .await
            .map_err(|_| LlmPlanError::Timeout(self.timeout))??;
        debug!("completion returned {} characters", raw.len());

        parse_plan_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn preferences() -> TravelPreferences {
        TravelPreferences {
            destination: "Kyoto".to_string(),
            start_date: Some("2024-04-01".to_string()),
            end_date: Some("2024-04-03".to_string()),
            days: 1,
            budget: 3000.0,
            travelers: 2,
            interests: vec!["food".to_string()],
            notes: Some("vegetarian".to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    const PLAN_JSON: &str = r#"{
        "title": "Kyoto",
        "overview": "Food trip",
        "days": [{
            "date": "2024-04-01",
            "summary": "Markets",
            "activities": [
                {"time": "Morning", "title": "Nishiki", "description": "Market", "budget": 40},
                {"time": "Evening", "title": "Pontocho", "description": "Dinner", "budget": "60"}
            ]
        }],
        "expenses": [{"name": "food", "planned": 600, "actual": 540}]
    }"#;

    #[test]
    fn test_messages_carry_date_sequence_and_schema() {
        let messages = build_plan_messages(&preferences(), now());
        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.contains("valid JSON"));

        let payload: serde_json::Value = serde_json::from_str(&messages[1].content).unwrap();
        assert_eq!(
            payload["dateSequence"],
            json!(["2024-04-01", "2024-04-02", "2024-04-03"])
        );
        assert_eq!(payload["dayCount"], json!(3));
        assert_eq!(payload["preferences"]["destination"], json!("Kyoto"));
        assert!(payload["responseSchema"]["days"].is_array());
    }

    #[test]
    fn test_messages_are_deterministic() {
        assert_eq!(
            build_plan_messages(&preferences(), now()),
            build_plan_messages(&preferences(), now())
        );
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n{\"a\":1}```  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("\n{\"a\":1}\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("Here you go: {\"a\":1}"), "Here you go: {\"a\":1}");
    }

    #[test]
    fn test_parse_plan_response_repairs_day_cost() {
        let raw = format!("```json\n{}\n```", PLAN_JSON);
        let plan = parse_plan_response(&raw).unwrap();
        assert_eq!(plan.days[0].estimated_cost, Some(100.0));
        assert_eq!(plan.days[0].activities[1].budget, Some(60.0));
    }

    #[test]
    fn test_parse_plan_response_rejects_garbage() {
        assert!(matches!(
            parse_plan_response("Sorry, I can't help with that."),
            Err(LlmPlanError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_plan_response(r#"{"title": "x", "overview": "y", "days": [], "expenses": []}"#),
            Err(LlmPlanError::Schema(_))
        ));
    }
}
