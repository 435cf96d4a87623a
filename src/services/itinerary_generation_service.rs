use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::config::LlmConfig;
use crate::models::travel::{ItineraryPlan, TravelPreferences};
use crate::services::fallback_planner::build_fallback_plan;
use crate::services::llm_client::{CompletionClient, HttpCompletionClient};
use crate::services::llm_planner::LlmPlanner;

/// Entry point for plan generation.
///
/// Tries the language model when one is configured and falls back to the
/// template planner on any failure, so callers always get a valid plan.
pub struct ItineraryGenerator {
    planner: Option<LlmPlanner>,
}

impl ItineraryGenerator {
    /// Template planner only.
    pub fn fallback_only() -> Self {
        Self { planner: None }
    }

    pub fn new(config: &LlmConfig) -> Self {
        if !config.is_enabled() {
            info!("LLM provider '{}' not enabled, using template planner", config.provider);
            return Self::fallback_only();
        }

        match HttpCompletionClient::new(config) {
            Ok(client) => {
                info!(
                    "LLM planning enabled with provider '{}' and model '{}'",
                    config.provider, config.model
                );
                Self::with_client(Arc::new(client), config)
            }
            Err(e) => {
                warn!("LLM client not available: {}. Using template planner.", e);
                Self::fallback_only()
            }
        }
    }

    pub fn with_client(client: Arc<dyn CompletionClient>, config: &LlmConfig) -> Self {
        Self {
            planner: Some(LlmPlanner::new(client, config.timeout)),
        }
    }

    pub fn uses_llm(&self) -> bool {
        self.planner.is_some()
    }

    pub async fn generate_itinerary(&self, preferences: &TravelPreferences) -> ItineraryPlan {
        self.generate_itinerary_at(preferences, Utc::now()).await
    }

    /// Same as `generate_itinerary` with an explicit reference time.
    pub async fn generate_itinerary_at(
        &self,
        preferences: &TravelPreferences,
        now: DateTime<Utc>,
    ) -> ItineraryPlan {
        if let Some(planner) = &self.planner {
            match planner.request_plan(preferences, now).await {
                Ok(plan) => return plan,
                Err(e) => warn!(
                    "LLM itinerary for '{}' failed, using template planner: {}",
                    preferences.destination, e
                ),
            }
        }

        build_fallback_plan(preferences, now)
    }
}
