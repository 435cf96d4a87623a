use std::sync::Arc;

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{bson::DateTime, Client, Collection};
use thiserror::Error;
use uuid::Uuid;

use crate::models::stored_plan::{StoredTravelPlan, TravelPlanDocument};
use crate::models::travel::{ItineraryPlan, TravelPreferences};

const COLLECTION: &str = "TravelPlans";

#[derive(Debug, Error)]
pub enum PlanStoreError {
    #[error("plan storage is not configured")]
    NotConfigured,
    #[error("plan not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("could not encode plan: {0}")]
    Encoding(#[from] bson::ser::Error),
}

/// Saved plans, always scoped to the user that owns them.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Most recently updated first.
    async fn list(&self, owner_id: &str) -> Result<Vec<StoredTravelPlan>, PlanStoreError>;

    async fn create(
        &self,
        owner_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError>;

    async fn update(
        &self,
        owner_id: &str,
        plan_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError>;

    async fn delete(&self, owner_id: &str, plan_id: &str) -> Result<(), PlanStoreError>;
}

pub struct MongoPlanStore {
    client: Arc<Client>,
    database: String,
}

impl MongoPlanStore {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn collection(&self) -> Collection<TravelPlanDocument> {
        self.client.database(&self.database).collection(COLLECTION)
    }
}

#[async_trait]
impl PlanStore for MongoPlanStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<StoredTravelPlan>, PlanStoreError> {
        let cursor = self
            .collection()
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "updated_at": -1 })
            .await?;
        let documents: Vec<TravelPlanDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(StoredTravelPlan::from).collect())
    }

    async fn create(
        &self,
        owner_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        let now = DateTime::now();
        let document = TravelPlanDocument {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: plan.title.clone(),
            overview: plan.overview.clone(),
            plan,
            preferences,
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&document).await?;
        Ok(document.into())
    }

    async fn update(
        &self,
        owner_id: &str,
        plan_id: &str,
        plan: ItineraryPlan,
        preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        let update = doc! {
            "$set": {
                "title": &plan.title,
                "overview": &plan.overview,
                "plan": bson::to_bson(&plan)?,
                "preferences": bson::to_bson(&preferences)?,
                "updated_at": DateTime::now(),
            }
        };

        self.collection()
            .find_one_and_update(doc! { "_id": plan_id, "owner_id": owner_id }, update)
            .return_document(mongodb::options::ReturnDocument::After)
            .await?
            .map(StoredTravelPlan::from)
            .ok_or(PlanStoreError::NotFound)
    }

    async fn delete(&self, owner_id: &str, plan_id: &str) -> Result<(), PlanStoreError> {
        self.collection()
            .delete_one(doc! { "_id": plan_id, "owner_id": owner_id })
            .await?;
        Ok(())
    }
}

/// Stand-in used when `MONGODB_URI` is absent: every call reports `NotConfigured`.
pub struct UnconfiguredPlanStore;

#[async_trait]
impl PlanStore for UnconfiguredPlanStore {
    async fn list(&self, _owner_id: &str) -> Result<Vec<StoredTravelPlan>, PlanStoreError> {
        Err(PlanStoreError::NotConfigured)
    }

    async fn create(
        &self,
        _owner_id: &str,
        _plan: ItineraryPlan,
        _preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        Err(PlanStoreError::NotConfigured)
    }

    async fn update(
        &self,
        _owner_id: &str,
        _plan_id: &str,
        _plan: ItineraryPlan,
        _preferences: TravelPreferences,
    ) -> Result<StoredTravelPlan, PlanStoreError> {
        Err(PlanStoreError::NotConfigured)
    }

    async fn delete(&self, _owner_id: &str, _plan_id: &str) -> Result<(), PlanStoreError> {
        Err(PlanStoreError::NotConfigured)
    }
}
