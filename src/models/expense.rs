use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_currency() -> String {
    "CNY".to_string()
}

/// A single spend recorded against an itinerary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub itinerary_id: String,
    pub category: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ExpenseError {
    #[error("itineraryId must not be empty")]
    MissingItinerary,
    #[error("category must not be empty")]
    MissingCategory,
    #[error("amount must be a non-negative number")]
    InvalidAmount,
}

impl ExpenseRecord {
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.itinerary_id.is_empty() {
            return Err(ExpenseError::MissingItinerary);
        }
        if self.category.is_empty() {
            return Err(ExpenseError::MissingCategory);
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ExpenseError::InvalidAmount);
        }
        Ok(())
    }
}
