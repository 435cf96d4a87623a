use actix_web::{web, HttpResponse, Responder};
use log::error;
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use crate::config::AppConfig;

/// What the health endpoint needs to know about the running service.
pub struct HealthContext {
    pub mongo: Option<Arc<Client>>,
    pub database: String,
    pub identity_configured: bool,
    pub llm_enabled: bool,
    pub llm_provider: String,
    pub llm_model: String,
}

impl HealthContext {
    pub fn new(config: &AppConfig, mongo: Option<Arc<Client>>) -> Self {
        Self {
            mongo,
            database: config.mongo.database.clone(),
            identity_configured: config.identity.url.is_some(),
            llm_enabled: config.llm.is_enabled(),
            llm_provider: config.llm.provider.clone(),
            llm_model: config.llm.model.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details.into()),
        }
    }

    fn error(details: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details.into()),
        }
    }
}

/*
    GET /api/health
*/
pub async fn health_check(context: web::Data<HealthContext>) -> impl Responder {
    let mut services = BTreeMap::new();
    services.insert("mongodb".to_string(), check_mongodb(&context).await);
    services.insert("identity".to_string(), check_identity(&context));
    services.insert("llm".to_string(), check_llm(&context));

    // The template planner keeps generation available without the LLM, so only
    // storage and identity degrade the service.
    let degraded = services
        .iter()
        .any(|(name, service)| name != "llm" && service.status != "ok");

    let health = HealthStatus {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(context: &HealthContext) -> ServiceStatus {
    let Some(client) = &context.mongo else {
        return ServiceStatus::error("MONGODB_URI not configured");
    };

    match client
        .database(&context.database)
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => ServiceStatus::ok("Connected successfully to MongoDB"),
        Err(e) => {
            error!("MongoDB health check failed: {}", e);
            ServiceStatus::error(format!("Failed to connect: {}", e))
        }
    }
}

fn check_identity(context: &HealthContext) -> ServiceStatus {
    if context.identity_configured {
        ServiceStatus::ok("Identity provider configured")
    } else {
        ServiceStatus::error("IDENTITY_URL not configured")
    }
}

fn check_llm(context: &HealthContext) -> ServiceStatus {
    if context.llm_enabled {
        ServiceStatus::ok(format!(
            "Provider '{}' with model '{}'",
            context.llm_provider, context.llm_model
        ))
    } else {
        ServiceStatus {
            status: "fallback".to_string(),
            details: Some("Template planner only".to_string()),
        }
    }
}
