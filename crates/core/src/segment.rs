use crate::geo::round_to;
use crate::models::{Coordinates, Destination, ItinerarySegment, Spot, TimeSlot};
use crate::profile::CategoryProfile;
use crate::scoring::interest_overlap;
use crate::template::{render, title_case, TemplateSlot, TemplateVars};

pub const FLAGSHIP_FOOD_STOPS: [&str; 5] = [
    "Wake & Bake Café",
    "Cafe Simla Times",
    "Indian Coffee House",
    "Himachali Rasoi Local Dhaba",
    "Honey Hut Dessert Cart",
];

pub const RICH_START_SUGGESTION: &str = "Start near your stay — short warm-up walk.";
pub const GENERIC_START_SUGGESTION: &str = "Start near your stay — slow warm-up walk.";

/// Per-interest recipe for synthesizing a segment at generic destinations.
#[derive(Debug, Clone, Copy)]
pub struct InterestBehavior {
    pub title: &'static str,
    pub description: &'static str,
    /// Morning, afternoon, evening.
    pub distance_km: [f64; 3],
    pub duration_hours: [f64; 3],
    pub entry_fee: &'static str,
    pub travel: &'static str,
    pub note: &'static str,
}

impl InterestBehavior {
    fn for_slot(values: &[f64; 3], slot: TimeSlot) -> f64 {
        match slot {
            TimeSlot::Morning => values[0],
            TimeSlot::Afternoon => values[1],
            TimeSlot::Evening => values[2],
        }
    }
}

const CULTURE: InterestBehavior = InterestBehavior {
    title: "{slot} heritage walk",
    description: "Trace {terrain} storylines with guides decoding architecture, murals, and rituals.",
    distance_km: [3.0, 2.5, 2.0],
    duration_hours: [2.5, 2.5, 2.0],
    entry_fee: "₹120 monument pass",
    travel: "Walking loop with short tuk-tuk hops",
    note: "Modest attire and socks recommended for temple entries.",
};

/// Behavior for an interest tag; unknown tags borrow the culture recipe.
pub fn interest_behavior(interest: &str) -> &'static InterestBehavior {
    match interest {
        "trekking" => &InterestBehavior {
            title: "{slot} ridge trek",
            description: "Follow {terrain} single-track near {name}, pausing for ridge selfies and chai thermos breaks.",
            distance_km: [5.2, 4.0, 3.0],
            duration_hours: [3.0, 2.5, 2.0],
            entry_fee: "Free",
            travel: "Cab to trailhead + moderate climb",
            note: "Pack rain shell + trail mix; guides available at the base kiosk.",
        },
        "food" => &InterestBehavior {
            title: "{slot} tasting crawl",
            description: "Graze through {foodHighlights} with chef interviews and spice market pauses.",
            distance_km: [1.5, 2.0, 1.2],
            duration_hours: [2.0, 2.5, 2.0],
            entry_fee: "₹200 tasting wallet",
            travel: "Walkable hop between cafes",
            note: "Tell hosts about dietary needs; many serve zero-waste tastings.",
        },
        "photography" => &InterestBehavior {
            title: "{slot} photo chase",
            description: "Shoot {photoHighlights} with framing tips and golden-hour compositions.",
            distance_km: [2.5, 3.0, 2.0],
            duration_hours: [2.5, 2.5, 2.0],
            entry_fee: "₹100 viewpoint permit",
            travel: "Short cab + on-foot loops",
            note: "Carry polarizer filters; drones need basic permits.",
        },
        "relaxation" => &InterestBehavior {
            title: "{slot} reset",
            description: "Slow mornings with wellness corners, hammock time, and journaling prompts overlooking {terrain}.",
            distance_km: [0.8, 1.0, 0.5],
            duration_hours: [2.0, 2.0, 1.5],
            entry_fee: "₹150 day-pass",
            travel: "Start at stay; optional spa shuttle",
            note: "BYO book + essential oils; places provide herbal teas.",
        },
        "adventure" => &InterestBehavior {
            title: "{slot} adrenaline block",
            description: "Layer {adventureHighlights} with certified operators and buffer time for transfers.",
            distance_km: [6.0, 8.0, 4.0],
            duration_hours: [3.5, 3.5, 2.5],
            entry_fee: "₹800 activity wristband",
            travel: "4x4 shuttle + brief trek",
            note: "Check insurance waiver and carry hydration packs.",
        },
        "nature" => &InterestBehavior {
            title: "{slot} nature immersion",
            description: "Forest baths among {natureHighlights}, bird calls logged via citizen-science apps.",
            distance_km: [3.5, 3.0, 2.0],
            duration_hours: [2.5, 2.5, 2.0],
            entry_fee: "₹50 eco-fee",
            travel: "Shared jeep to trailhead",
            note: "Carry reusable bottles and respect silence zones.",
        },
        "shopping" => &InterestBehavior {
            title: "{slot} maker circuit",
            description: "Meet artisans behind {shoppingHighlights}; test your haggling and support fair trade.",
            distance_km: [1.8, 2.2, 1.5],
            duration_hours: [2.0, 2.5, 2.0],
            entry_fee: "Free (pay for what you love)",
            travel: "Walk + tuk-tuk combo",
            note: "Carry cash for micro vendors; many wrap purchases in newspaper.",
        },
        _ => &CULTURE,
    }
}

pub fn travel_tip(distance_km: f64) -> String {
    if distance_km <= 0.4 {
        "Begin near your stay — breathe in the local rhythm.".to_string()
    } else if distance_km < 1.8 {
        format!("Walkable hop (~{distance_km} km) via shaded lanes.")
    } else if distance_km < 5.0 {
        format!("Shared cab or scooter (~{distance_km} km / 15 min).")
    } else {
        format!("Plan a 25+ min transfer (~{distance_km} km); buffer for scenic stops.")
    }
}

fn pace_note(traveler_type: &str) -> String {
    format!(" Tailored for {} pace.", title_case(traveler_type.trim()))
}

fn hidden_gem_note(profile: &CategoryProfile) -> String {
    format!(" Hidden gem: {}.", profile.hidden_gem.trim_end_matches('.'))
}

/// Notes for a real spot: matched tags, a crowd clause, and the hidden-gem flag.
pub fn spot_notes(spot: &Spot, interests: &[String]) -> String {
    let matched = spot
        .tags
        .iter()
        .filter(|tag| interests.contains(&tag.to_lowercase()))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut note = format!(
        "Aligns with {}.",
        if matched.is_empty() { "core interests" } else { matched.as_str() }
    );

    if spot.crowd_score >= 8 {
        note.push_str(" Arrive before 9 AM to avoid tour bus rush.");
    } else if spot.crowd_score <= 4 {
        note.push_str(" Naturally low crowd score for unhurried frames.");
    }
    if spot.is_hidden_gem {
        note.push_str(" Flagged as hidden gem by admin.");
    }
    note
}

/// Inputs shared by every segment of one trip.
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext<'a> {
    pub destination: &'a Destination,
    pub profile: &'a CategoryProfile,
    pub interests: &'a [String],
    pub traveler_type: &'a str,
    /// Destination carries an admin hidden-gem tag.
    pub hidden_gem_tagged: bool,
}

impl SegmentContext<'_> {
    fn evening_gem(&self, slot: TimeSlot) -> bool {
        self.hidden_gem_tagged && slot == TimeSlot::Evening
    }
}

/// Maps a selected spot into a segment. `previous` is the prior segment's
/// coordinates within the same day, `None` for the first slot.
pub fn build_spot_segment(
    ctx: &SegmentContext<'_>,
    spot: &Spot,
    slot: TimeSlot,
    previous: Option<Coordinates>,
    food_index: usize,
) -> ItinerarySegment {
    let coordinates = spot.coordinates();
    let travel_distance_km = match previous {
        Some(prev) => crate::geo::haversine_km(Some(prev), Some(coordinates)),
        None => 0.0,
    };
    let travel_suggestion = if travel_distance_km == 0.0 {
        RICH_START_SUGGESTION.to_string()
    } else {
        travel_tip(travel_distance_km)
    };
    let overlap = interest_overlap(spot, ctx.interests);

    let mut notes = spot_notes(spot, ctx.interests);
    if ctx.evening_gem(slot) && !notes.to_lowercase().contains("hidden gem") {
        notes.push_str(&hidden_gem_note(ctx.profile));
    }
    notes.push_str(&pace_note(ctx.traveler_type));

    ItinerarySegment {
        time_of_day: slot,
        start_time: slot.start_time().to_string(),
        duration_hours: slot.duration_hours(),
        spot_id: spot.id.clone(),
        title: spot.name.clone(),
        description: spot.description.clone(),
        coordinates,
        entry_fee: spot.entry_fee.clone(),
        travel_distance_km,
        travel_suggestion,
        food_stop: FLAGSHIP_FOOD_STOPS[food_index % FLAGSHIP_FOOD_STOPS.len()].to_string(),
        interest_match_score: (overlap * 3).clamp(5, 10) as u8,
        notes,
    }
}

/// A synthesized segment plus the interest it was built from.
#[derive(Debug, Clone)]
pub struct SynthesizedSegment {
    pub interest: String,
    pub segment: ItinerarySegment,
}

/// Builds a generic-catalog segment from the interest's behavior template.
pub fn build_interest_segment(
    ctx: &SegmentContext<'_>,
    interest: &str,
    slot: TimeSlot,
    sequence: usize,
) -> SynthesizedSegment {
    let behavior = interest_behavior(interest);
    let profile = ctx.profile;
    let name = ctx.destination.name.as_str();

    let jitter = if sequence % 2 == 1 { 0.4 } else { 0.0 };
    let distance = round_to(InterestBehavior::for_slot(&behavior.distance_km, slot) + jitter, 1);
    let slot_word = title_case(slot.mood());

    let title_vars = TemplateVars::name(name)
        .with(TemplateSlot::Slot, &slot_word)
        .with(TemplateSlot::Terrain, profile.terrain);
    let description_vars = TemplateVars::name(name)
        .with(TemplateSlot::Terrain, profile.terrain)
        .with(TemplateSlot::FoodHighlights, profile.food_highlights)
        .with(TemplateSlot::AdventureHighlights, profile.adventure_highlights)
        .with(TemplateSlot::PhotoHighlights, profile.photo_highlights)
        .with(TemplateSlot::NatureHighlights, profile.nature_highlights)
        .with(TemplateSlot::ShoppingHighlights, profile.shopping_highlights);

    let mut notes = behavior.note.to_string();
    if ctx.evening_gem(slot) {
        notes.push_str(&hidden_gem_note(profile));
    }
    notes.push_str(&pace_note(ctx.traveler_type));

    let segment = ItinerarySegment {
        time_of_day: slot,
        start_time: slot.start_time().to_string(),
        duration_hours: InterestBehavior::for_slot(&behavior.duration_hours, slot),
        spot_id: format!(
            "{}-{}-{}-{}",
            ctx.destination.id,
            interest,
            slot.as_str().to_lowercase(),
            sequence
        ),
        title: render(behavior.title, &title_vars),
        description: render(behavior.description, &description_vars),
        coordinates: Coordinates::ORIGIN,
        entry_fee: behavior.entry_fee.to_string(),
        travel_distance_km: distance,
        travel_suggestion: travel_tip(distance),
        food_stop: profile.food_stop(sequence).to_string(),
        interest_match_score: (6 + sequence % 4).min(10) as u8,
        notes,
    };

    SynthesizedSegment {
        interest: interest.to_string(),
        segment,
    }
}
