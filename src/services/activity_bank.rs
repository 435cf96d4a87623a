/// A curated suggestion the planner can drop into an afternoon or evening slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub location: &'static str,
}

const fn entry(title: &'static str, description: &'static str, location: &'static str) -> BankEntry {
    BankEntry {
        title,
        description,
        location,
    }
}

pub const DEFAULT_INTEREST: &str = "culture";

static INTEREST_BANK: &[(&str, &[BankEntry])] = &[
    (
        "food",
        &[
            entry(
                "Local breakfast tasting",
                "Pick a well-reviewed neighborhood spot for a traditional breakfast and learn how locals start the day.",
                "Traditional snack street",
            ),
            entry(
                "Signature restaurant experience",
                "Book a renowned or guide-recommended restaurant ahead of time to skip the queue.",
                "Dining district",
            ),
            entry(
                "Street food crawl",
                "Sample small plates across a night market, sharing dishes to try more of them.",
                "Night market",
            ),
        ],
    ),
    (
        "culture",
        &[
            entry(
                "City cultural landmark",
                "Visit a museum or cultural hall to learn how the destination grew into what it is today.",
                "Cultural center",
            ),
            entry(
                "Traditional craft workshop",
                "Join a hands-on class in a local craft and take home something you made.",
                "Artisan workshop",
            ),
        ],
    ),
    (
        "family",
        &[
            entry(
                "Interactive family park",
                "Spend time at a hands-on venue that keeps kids engaged while staying safe.",
                "Family park",
            ),
            entry(
                "Family cooking class",
                "Bake or cook together in a class designed for parents and children.",
                "Family activity studio",
            ),
        ],
    ),
    (
        "nature",
        &[
            entry(
                "Countryside hike",
                "Head to a nearby scenic area to hike or cycle and enjoy the fresh air.",
                "Country park",
            ),
            entry(
                "Sunset viewpoint",
                "Find an open hilltop or seaside lookout and catch the sunset.",
                "Scenic overlook",
            ),
        ],
    ),
    (
        "history",
        &[
            entry(
                "Historic sites walk",
                "Explore the best-known historic sites with a guide who brings the events to life.",
                "Old town",
            ),
            entry(
                "In-depth museum tour",
                "Reserve a curator-led tour to uncover the stories behind the collection.",
                "National museum",
            ),
        ],
    ),
    (
        "adventure",
        &[
            entry(
                "Outdoor challenge",
                "Try a treetop ropes course or white-water rafting for an adrenaline rush.",
                "Outdoor adventure base",
            ),
            entry(
                "Night exploration",
                "Join a guided night hike or city bike ride to see a different side of the city.",
                "Night tour route",
            ),
        ],
    ),
    (
        "art",
        &[
            entry(
                "Gallery circuit",
                "Pick a headline exhibition or art district for an immersive afternoon of viewing.",
                "Contemporary art museum",
            ),
            entry(
                "Creative workshop",
                "Take a pottery, painting or photography class and make your own souvenir.",
                "Art studio",
            ),
        ],
    ),
    (
        "shopping",
        &[
            entry(
                "Boutique quarter",
                "Browse the shopping streets locals recommend, with an eye for designers and handmade goods.",
                "Central shopping district",
            ),
            entry(
                "Local market",
                "Wander a night or makers' market and collect one-of-a-kind keepsakes.",
                "Makers' market",
            ),
        ],
    ),
    (
        "nightlife",
        &[
            entry(
                "City lights tour",
                "Take an evening cruise or head up an observation deck to see the skyline lit up.",
                "Best night viewpoint",
            ),
            entry(
                "Live music bar",
                "Pick a well-rated live music venue and experience the city after dark.",
                "Music bar street",
            ),
        ],
    ),
    (
        "leisure",
        &[
            entry(
                "Spa and unwind",
                "Book a massage or hot-spring spa to shake off the travel fatigue.",
                "Day spa",
            ),
            entry(
                "Slow coffee break",
                "Settle into a specialty coffee shop and enjoy an unhurried afternoon.",
                "Specialty coffee house",
            ),
        ],
    ),
];

/// Suggestions for an interest tag. Lookup ignores case and surrounding
/// whitespace; unknown tags get an empty slice.
pub fn entries_for(interest: &str) -> &'static [BankEntry] {
    let key = interest.trim();
    INTEREST_BANK
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(key))
        .map(|(_, entries)| *entries)
        .unwrap_or(&[])
}

pub fn known_interests() -> impl Iterator<Item = &'static str> {
    INTEREST_BANK.iter().map(|(tag, _)| *tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_room_to_rotate() {
        let required = [
            "food", "culture", "family", "nature", "history", "adventure", "art", "shopping",
            "nightlife", "leisure",
        ];
        for tag in required {
            assert!(entries_for(tag).len() >= 2, "{} needs at least two entries", tag);
        }
        assert_eq!(known_interests().count(), required.len());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(entries_for(" Food "), entries_for("food"));
    }

    #[test]
    fn test_unknown_interest_is_empty() {
        assert!(entries_for("underwater basket weaving").is_empty());
    }

    #[test]
    fn test_default_interest_is_stocked() {
        assert!(!entries_for(DEFAULT_INTEREST).is_empty());
    }
}
