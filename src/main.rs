use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use travel_planner_api::{
    config::AppConfig,
    db,
    routes,
    routes::health::HealthContext,
    services::{
        identity_service::{HttpIdentityProvider, IdentityProvider, UnconfiguredIdentityProvider},
        itinerary_generation_service::ItineraryGenerator,
        plan_service::{MongoPlanStore, PlanStore, UnconfiguredPlanStore},
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!("Starting travel planner on {}:{}", config.host, config.port);

    let mongo = match &config.mongo.uri {
        Some(uri) => match db::mongo::create_mongo_client(uri, &config.mongo.database).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("MongoDB unavailable, saved plans disabled: {}", e);
                None
            }
        },
        None => None,
    };

    let plan_store: Arc<dyn PlanStore> = match &mongo {
        Some(client) => Arc::new(MongoPlanStore::new(client.clone(), config.mongo.database.clone())),
        None => Arc::new(UnconfiguredPlanStore),
    };

    let identity: Arc<dyn IdentityProvider> = match HttpIdentityProvider::from_config(&config.identity) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            warn!("Identity provider unavailable, saved plans disabled: {}", e);
            Arc::new(UnconfiguredIdentityProvider)
        }
    };

    let generator = web::Data::new(ItineraryGenerator::new(&config.llm));
    let plan_store = web::Data::from(plan_store);
    let identity = web::Data::from(identity);
    let health = web::Data::new(HealthContext::new(&config, mongo));

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(generator.clone())
            .app_data(plan_store.clone())
            .app_data(identity.clone())
            .app_data(health.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
