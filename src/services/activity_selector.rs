use crate::models::travel::{ItineraryActivity, TravelPreferences};
use crate::services::activity_bank::{entries_for, DEFAULT_INTEREST};

/// Share of the per-day budget assigned to each interest-driven slot.
const SLOT_BUDGET_SHARE: f64 = 0.35;

struct SlotTemplate {
    time: &'static str,
    title: &'static str,
    description: &'static str,
}

const DAILY_SLOTS: [SlotTemplate; 3] = [
    SlotTemplate {
        time: "Morning",
        title: "Morning city stroll",
        description: "Walk around the city center to get a feel for transport and the neighborhood.",
    },
    SlotTemplate {
        time: "Afternoon",
        title: "Themed experience",
        description: "A class or an in-depth visit picked around your interests.",
    },
    SlotTemplate {
        time: "Evening",
        title: "Local evening",
        description: "Night views or a food market to wind down the day.",
    },
];

impl SlotTemplate {
    fn to_activity(&self) -> ItineraryActivity {
        ItineraryActivity {
            time: self.time.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            location: None,
            budget: None,
        }
    }
}

/// Budget each day can draw on, when the trip has one.
fn per_day_budget(preferences: &TravelPreferences, total_days: u32) -> Option<f64> {
    if total_days == 0 || preferences.budget <= 0.0 {
        return None;
    }
    let per_day = preferences.budget / total_days as f64;
    (per_day > 0.0).then_some(per_day)
}

/// Builds the three activities of one day.
///
/// The morning is always a destination walk. Afternoon and evening rotate through
/// the traveler's interests by `(day_index + slot)`, and through that interest's
/// bank entries by the same offset, so neighboring days and slots differ while
/// identical inputs always give identical output.
pub fn select_daily_activities(
    preferences: &TravelPreferences,
    day_index: u32,
    total_days: u32,
) -> Vec<ItineraryActivity> {
    let default_interests = [DEFAULT_INTEREST.to_string()];
    let interests: &[String] = if preferences.interests.is_empty() {
        &default_interests
    } else {
        &preferences.interests
    };
    let slot_budget = per_day_budget(preferences, total_days).map(|b| (b * SLOT_BUDGET_SHARE).round());

    DAILY_SLOTS
        .iter()
        .enumerate()
        .map(|(slot, template)| {
            if slot == 0 {
                let mut activity = template.to_activity();
                activity.description = format!(
                    "A morning walk through {}, scouting transport options and breakfast spots along the way.",
                    preferences.destination
                );
                return activity;
            }

            let rotation = day_index as usize + slot;
            let interest = &interests[rotation % interests.len()];
            let bank = entries_for(interest);
            if bank.is_empty() {
                return template.to_activity();
            }
            let pick = &bank[rotation % bank.len()];

            ItineraryActivity {
                time: template.time.to_string(),
                title: format!("{} ({})", pick.title, interest),
                description: pick.description.to_string(),
                location: Some(pick.location.to_string()),
                budget: slot_budget,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn preferences(interests: &[&str], budget: f64) -> TravelPreferences {
        TravelPreferences {
            destination: "Kyoto".to_string(),
            start_date: None,
            end_date: None,
            days: 4,
            budget,
            travelers: 2,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    #[test]
    fn test_three_slots_in_daypart_order() {
        let activities = select_daily_activities(&preferences(&["food"], 1000.0), 0, 2);
        let times: Vec<&str> = activities.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["Morning", "Afternoon", "Evening"]);
    }

    #[test]
    fn test_morning_names_destination_and_has_no_budget() {
        let activities = select_daily_activities(&preferences(&["food"], 1000.0), 1, 2);
        assert!(activities[0].description.contains("Kyoto"));
        assert!(activities[0].budget.is_none());
        assert!(activities[0].location.is_none());
    }

    #[test]
    fn test_slot_budget_is_share_of_daily_budget() {
        let activities = select_daily_activities(&preferences(&["food", "culture"], 4000.0), 0, 2);
        assert_eq!(activities[1].budget, Some(700.0));
        assert_eq!(activities[2].budget, Some(700.0));
    }

    #[test]
    fn test_zero_budget_leaves_slots_unpriced() {
        let activities = select_daily_activities(&preferences(&["food"], 0.0), 0, 3);
        assert!(activities.iter().all(|a| a.budget.is_none()));
    }

    #[test]
    fn test_double_rotation_picks() {
        let prefs = preferences(&["food", "culture"], 4000.0);

        let day0 = select_daily_activities(&prefs, 0, 2);
        // slot 1 -> interests[1] = culture, bank[1]
        assert_eq!(day0[1].title, "Traditional craft workshop (culture)");
        // slot 2 -> interests[0] = food, bank[2]
        assert_eq!(day0[2].title, "Street food crawl (food)");

        let day1 = select_daily_activities(&prefs, 1, 2);
        // slot 1 -> interests[0] = food, food bank[2]
        assert_eq!(day1[1].title, "Street food crawl (food)");
        // slot 2 -> interests[1] = culture, culture bank[1]
        assert_eq!(day1[2].title, "Traditional craft workshop (culture)");
    }

    #[test]
    fn test_unknown_interest_falls_back_to_template() {
        let activities = select_daily_activities(&preferences(&["knitting"], 900.0), 0, 3);
        assert_eq!(activities[1].title, "Themed experience");
        assert!(activities[1].budget.is_none());
        assert!(activities[1].location.is_none());
    }

    #[test]
    fn test_empty_interests_use_default_category() {
        let activities = select_daily_activities(&preferences(&[], 900.0), 0, 3);
        assert!(activities[1].title.ends_with("(culture)"));
        assert!(activities[2].title.ends_with("(culture)"));
    }

    #[test]
    fn test_rotation_reaches_every_interest_in_each_slot() {
        let interests = ["food", "culture", "nature"];
        let prefs = preferences(&interests, 3000.0);
        let total_days = (interests.len() * 2) as u32;

        for slot in 1..=2 {
            let seen: HashSet<String> = (0..total_days)
                .map(|day| select_daily_activities(&prefs, day, total_days)[slot].title.clone())
                .filter_map(|title| {
                    interests
                        .iter()
                        .find(|i| title.ends_with(&format!("({})", i)))
                        .map(|i| i.to_string())
                })
                .collect();
            assert_eq!(seen.len(), interests.len(), "slot {} starved an interest", slot);
        }
    }

    #[test]
    fn test_selection_is_repeatable() {
        let prefs = preferences(&["art", "nightlife", "history"], 2500.0);
        for day in 0..6 {
            assert_eq!(
                select_daily_activities(&prefs, day, 6),
                select_daily_activities(&prefs, day, 6)
            );
        }
    }
}
