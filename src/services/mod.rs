pub mod activity_bank;
pub mod activity_selector;
pub mod budget_service;
pub mod fallback_planner;
pub mod identity_service;
pub mod itinerary_generation_service;
pub mod llm_client;
pub mod llm_planner;
pub mod plan_service;
pub mod plan_validation;
pub mod trip_dates;
