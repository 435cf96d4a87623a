use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::travel::{ItineraryPlan, TravelPreferences};

/// Row shape in the `TravelPlans` collection. Every query filters on `owner_id`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TravelPlanDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub overview: String,
    pub plan: ItineraryPlan,
    pub preferences: TravelPreferences,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// What the plans API returns for a saved plan.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTravelPlan {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub overview: String,
    pub plan: ItineraryPlan,
    pub preferences: TravelPreferences,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TravelPlanDocument> for StoredTravelPlan {
    fn from(doc: TravelPlanDocument) -> Self {
        Self {
            id: doc.id,
            user_id: doc.owner_id,
            title: doc.title,
            overview: doc.overview,
            plan: doc.plan,
            preferences: doc.preferences,
            created_at: doc.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: doc.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/plans`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePlanRequest {
    pub plan: serde_json::Value,
    pub preferences: TravelPreferences,
}

/// Body of `PUT /api/plans/{id}`. Both halves are optional on the wire but the
/// handler requires them together.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpdatePlanRequest {
    #[serde(default)]
    pub plan: Option<serde_json::Value>,
    #[serde(default)]
    pub preferences: Option<TravelPreferences>,
}
