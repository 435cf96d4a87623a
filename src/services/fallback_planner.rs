use chrono::{DateTime, Utc};

use crate::models::travel::{ItineraryDay, ItineraryPlan, TravelPreferences};
use crate::services::activity_selector::select_daily_activities;
use crate::services::budget_service::BudgetService;
use crate::services::trip_dates::resolve_trip_window;

const GENERIC_FOCUS: &str = "general sightseeing";
const CONDITIONS_DISCLAIMER: &str =
    "Adjust each day for real-time traffic, weather and ticket availability.";

fn build_overview(preferences: &TravelPreferences) -> String {
    let focus = if preferences.interests.is_empty() {
        GENERIC_FOCUS.to_string()
    } else {
        preferences.interests.join(", ")
    };

    let mut parts = vec![
        format!(
            "This {} itinerary is built around {}, mixing classic sights with personal picks.",
            preferences.destination, focus
        ),
        CONDITIONS_DISCLAIMER.to_string(),
    ];
    if let Some(notes) = preferences.notes.as_deref().filter(|n| !n.is_empty()) {
        parts.push(format!("Additional requests: {}", notes));
    }
    parts.join(" ")
}

/// Template-only plan. Needs nothing but the preferences and a reference "now",
/// so it can always stand in when the language model is unavailable.
pub fn build_fallback_plan(preferences: &TravelPreferences, now: DateTime<Utc>) -> ItineraryPlan {
    let window = resolve_trip_window(preferences, now);

    let days: Vec<ItineraryDay> = (0..window.day_count)
        .zip(window.date_sequence())
        .map(|(day_index, date)| {
            let mut day = ItineraryDay {
                date,
                summary: format!("{} day {} highlights", preferences.destination, day_index + 1),
                activities: select_daily_activities(preferences, day_index, window.day_count),
                estimated_cost: None,
            };
            day.estimated_cost = day.activity_budget_total();
            day
        })
        .collect();

    ItineraryPlan {
        title: format!("{} {}-day itinerary", preferences.destination, days.len()),
        overview: build_overview(preferences),
        days,
        expenses: BudgetService::allocate(preferences.budget, preferences.travelers),
    }
}
