#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::Utc;

use travel_planner_api::config::{AppConfig, IdentityConfig, LlmConfig, MongoConfig};
use travel_planner_api::middleware::auth_context::AuthenticatedUser;
use travel_planner_api::models::stored_plan::StoredTravelPlan;
use travel_planner_api::models::travel::{ItineraryPlan, TravelPreferences};
use travel_planner_api::routes::{self, health::HealthContext};
use travel_planner_api::services::identity_service::{IdentityError, IdentityProvider};
use travel_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use travel_planner_api::services::plan_service::{PlanStore, PlanStoreError};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

/// Accepts two fixed tokens.
pub struct StubIdentity;

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        match token {
            ALICE_TOKEN => Ok(AuthenticatedUser {
                user_id: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
            }),
            BOB_TOKEN => Ok(AuthenticatedUser {
                user_id: "bob".to_string(),
                email: None,
            }),
            _ => Err(IdentityError::InvalidToken),
        }
    }
}

/// Plans kept in memory, with a counter standing in for wall-clock timestamps.
#[derive(Default)]
pub struct InMemoryPlanStore {
    plans: Mutex<HashMap<String, (u64, StoredTravelPlan)>>,
    clock: Mutex<u64>,
}

impl InMemoryPlanStore {
    fn tick(&self) -> u64 {
        let mut clock = self.clock.lock().unwrap();
        *clock += 1;
        *clock
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<StoredTravelPlan>, PlanStoreError> {
        let plans = self.plans.lock().unwrap();
        let mut owned: Vec<&(u64, StoredTravelPlan)> =
            plans.values().filter(|(_, p)| p.user_id == owner_id).collect();
        owned.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(owned.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn create(
        &self,
        owner_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        let tick = self.tick();
        let now = Utc::now().to_rfc3339();
        let stored = StoredTravelPlan {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            title: plan.title.clone(),
            overview: plan.overview.clone(),
            plan,
            preferences,
            created_at: now.clone(),
            updated_at: now,
        };
        self.plans
            .lock()
            .unwrap()
            .insert(stored.id.clone(), (tick, stored.clone()));
        Ok(stored)
    }

    async fn update(
        &self,
        owner_id: &str,
        plan_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        let tick = self.tick();
        let mut plans = self.plans.lock().unwrap();
        match plans.get_mut(plan_id) {
            Some((updated, stored)) if stored.user_id == owner_id => {
                *updated = tick;
                stored.title = plan.title.clone();
                stored.overview = plan.overview.clone();
                stored.plan = plan;
                stored.preferences = preferences;
                stored.updated_at = Utc::now().to_rfc3339();
                Ok(stored.clone())
            }
            _ => Err(PlanStoreError::NotFound),
        }
    }

    async fn delete(&self, owner_id: &str, plan_id: &str) -> Result<(), PlanStoreError> {
        let mut plans = self.plans.lock().unwrap();
        if matches!(plans.get(plan_id), Some((_, p)) if p.user_id == owner_id) {
            plans.remove(plan_id);
        }
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        mongo: MongoConfig {
            uri: None,
            database: "TravelPlannerTest".to_string(),
        },
        identity: IdentityConfig {
            url: Some("http://identity.test".to_string()),
            api_key: String::new(),
        },
        llm: LlmConfig::default(),
    }
}

pub struct TestApp {
    pub generator: web::Data<ItineraryGenerator>,
    pub store: web::Data<dyn PlanStore>,
    pub identity: web::Data<dyn IdentityProvider>,
    pub health: web::Data<HealthContext>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_generator(ItineraryGenerator::fallback_only())
    }

    pub fn with_generator(generator: ItineraryGenerator) -> Self {
        let store: Arc<dyn PlanStore> = Arc::new(InMemoryPlanStore::default());
        let identity: Arc<dyn IdentityProvider> = Arc::new(StubIdentity);
        Self {
            generator: web::Data::new(generator),
            store: web::Data::from(store),
            identity: web::Data::from(identity),
            health: web::Data::new(HealthContext::new(&test_config(), None)),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn PlanStore>) -> Self {
        self.store = web::Data::from(store);
        self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.generator.clone())
            .app_data(self.store.clone())
            .app_data(self.identity.clone())
            .app_data(self.health.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    }
}

pub fn kyoto_preferences() -> serde_json::Value {
    serde_json::json!({
        "destination": "Kyoto",
        "days": 2,
        "budget": 4000,
        "travelers": 2,
        "interests": ["food", "culture"]
    })
}
