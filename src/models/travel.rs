use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// What the traveler asked for. Immutable for the lifetime of a request.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "deserialize_rounded_u32")]
    pub days: u32,
    pub budget: f64,
    #[serde(deserialize_with = "deserialize_rounded_u32")]
    pub travelers: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Longest trip the planner will lay out.
pub const MAX_TRIP_DAYS: u32 = 366;

#[derive(Debug, Error, PartialEq)]
pub enum PreferencesError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("days must be at least 1")]
    InvalidDays,
    #[error("days must not exceed {}", MAX_TRIP_DAYS)]
    TooManyDays,
    #[error("budget must be a non-negative number")]
    InvalidBudget,
    #[error("travelers must be at least 1")]
    InvalidTravelers,
}

impl TravelPreferences {
    /// Boundary check run by the HTTP layer before anything reaches the planner.
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if self.destination.trim().is_empty() {
            return Err(PreferencesError::EmptyDestination);
        }
        if self.days < 1 {
            return Err(PreferencesError::InvalidDays);
        }
        if self.days > MAX_TRIP_DAYS {
            return Err(PreferencesError::TooManyDays);
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(PreferencesError::InvalidBudget);
        }
        if self.travelers < 1 {
            return Err(PreferencesError::InvalidTravelers);
        }
        Ok(())
    }
}

// Accepts 3 and 3.0 alike; anything that is not a non-negative number becomes 0
// and is then rejected by `validate`.
fn deserialize_rounded_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                Ok(i.min(u32::MAX as u64) as u32)
            } else if let Some(f) = n.as_f64() {
                Ok(if f > 0.0 { f.ceil() as u32 } else { 0 })
            } else {
                Ok(0)
            }
        }
        _ => Ok(0),
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryActivity {
    pub time: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub date: String,
    pub summary: String,
    pub activities: Vec<ItineraryActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

impl ItineraryDay {
    /// Sum of the activity budgets, or `None` when nothing in the day carries a cost.
    pub fn activity_budget_total(&self) -> Option<f64> {
        let total: f64 = self.activities.iter().filter_map(|a| a.budget).sum();
        if total > 0.0 {
            Some(total.round())
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExpenseCategory {
    pub name: String,
    pub planned: f64,
    pub actual: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryPlan {
    pub title: String,
    pub overview: String,
    pub days: Vec<ItineraryDay>,
    pub expenses: Vec<ExpenseCategory>,
}
