use chrono::{DateTime, Utc};

use crate::alerts::destination_alerts;
use crate::catalog::{CatalogSnapshot, DestinationCatalog};
use crate::error::PlanError;
use crate::models::{
    Alert, Budget, DayPlan, Destination, DestinationSnapshot, HiddenGemTags, ItineraryRequest,
    ItineraryResponse, ItinerarySummary,
};
use crate::planner::DayPlanner;
use crate::profile::{resolve_profile, CategoryProfile};
use crate::scoring::normalize_interests;
use crate::segment::SegmentContext;
use crate::template::{group_thousands, title_case};
use crate::validation::validate_request;

pub const TAGLINE: &str = "AI travel assistant delivering region-first intelligence.";
pub const HERO_COPY: &str =
    "Plan confident trips with real-time alerts, hidden gems, and offline-ready itineraries.";
const TOP_SPOT_COUNT: usize = 5;

/// "<tier text> · approx ₹<total> for N day(s)"
pub fn total_cost_estimate(budget: Budget, days: u8) -> String {
    let total = u64::from(budget.daily_rupees()) * u64::from(days);
    format!(
        "{} · approx ₹{} for {days} day(s)",
        budget.daily_cost_text(),
        group_thousands(total)
    )
}

pub fn destination_label(destination: &Destination) -> String {
    format!("{} · {}", destination.name, destination.region)
}

fn tagged_count(tags: &HiddenGemTags, destination_id: &str) -> usize {
    tags.get(destination_id).map(Vec::len).unwrap_or(0)
}

struct SummaryInputs<'a> {
    destination: &'a Destination,
    request: &'a ItineraryRequest,
    profile: &'a CategoryProfile,
    alerts: &'a [Alert],
    days: &'a [DayPlan],
    tagged: usize,
}

fn build_summary(inputs: SummaryInputs<'_>) -> ItinerarySummary {
    let SummaryInputs {
        destination,
        request,
        profile,
        alerts,
        days,
        tagged,
    } = inputs;
    let hidden_gem_count = days
        .iter()
        .flat_map(|day| &day.segments)
        .filter(|segment| segment.mentions_hidden_gem())
        .count();

    ItinerarySummary {
        destination_id: destination.id.clone(),
        traveler_type: request.traveler_type.clone(),
        budget: request.budget,
        interests: request.interests.clone(),
        cost_estimate: total_cost_estimate(request.budget, request.days),
        road_trip_plan: profile.road_trip_for(&destination.name),
        bike_plan: profile.bike_route_for(&destination.name),
        adventure_highlights: profile.adventure_highlights.to_string(),
        food_highlights: profile.food_highlights.to_string(),
        photo_highlights: profile.photo_highlights.to_string(),
        nature_highlights: profile.nature_highlights.to_string(),
        shopping_highlights: profile.shopping_highlights.to_string(),
        hidden_gem_callout: profile.hidden_gem.to_string(),
        tagged_hidden_gems: tagged,
        hidden_gem_count,
        alerts_applied: alerts.len(),
    }
}

/// Deterministic itinerary for `request` against one catalog snapshot.
///
/// `now` anchors synthesized alert timestamps; nothing else in the output depends on it.
pub fn generate_itinerary(
    snapshot: &CatalogSnapshot,
    tags: &HiddenGemTags,
    request: &ItineraryRequest,
    now: DateTime<Utc>,
) -> Result<ItineraryResponse, PlanError> {
    validate_request(request)?;
    let destination = snapshot
        .destination(&request.destination)
        .ok_or_else(|| PlanError::not_found(request.destination.trim()))?;

    let profile = resolve_profile(destination);
    let interests = normalize_interests(&request.interests);
    let requested = request
        .interests
        .iter()
        .map(|interest| interest.trim().to_lowercase())
        .collect::<Vec<_>>();
    let alerts = destination_alerts(destination, &snapshot.alerts, now);
    let tagged = tagged_count(tags, &destination.id);

    let ctx = SegmentContext {
        destination,
        profile: &profile,
        interests: &interests,
        traveler_type: &request.traveler_type,
        hidden_gem_tagged: tagged > 0,
    };
    let planner = DayPlanner::new(ctx, request.budget, &requested, &alerts);
    let days = match snapshot.catalog_for(destination) {
        DestinationCatalog::RichSpots(spots) => planner.plan_spot_days(spots, request.days)?,
        DestinationCatalog::GenericCategory => planner.plan_synthesized_days(request.days),
    };

    let summary = build_summary(SummaryInputs {
        destination,
        request,
        profile: &profile,
        alerts: &alerts,
        days: &days,
        tagged,
    });

    Ok(ItineraryResponse {
        destination: destination_label(destination),
        month: request.month.clone(),
        days,
        summary,
    })
}

/// Landing-page view of a destination.
pub fn destination_snapshot(
    snapshot: &CatalogSnapshot,
    slug: &str,
    now: DateTime<Utc>,
) -> Result<DestinationSnapshot, PlanError> {
    let destination = snapshot
        .destination(slug)
        .ok_or_else(|| PlanError::not_found(slug))?;
    let profile = resolve_profile(destination);

    let (top_spots, experience_ideas) = match snapshot.catalog_for(destination) {
        DestinationCatalog::RichSpots(spots) => {
            (spots.iter().take(TOP_SPOT_COUNT).cloned().collect(), Vec::new())
        }
        DestinationCatalog::GenericCategory => (
            Vec::new(),
            destination
                .interests
                .iter()
                .map(|interest| format!("{} block", title_case(interest)))
                .collect(),
        ),
    };

    Ok(DestinationSnapshot {
        name: destination.name.clone(),
        region: destination.region.clone(),
        best_time: destination.best_time.clone(),
        summary: destination.summary.clone(),
        interests: destination.interests.clone(),
        tagline: TAGLINE.to_string(),
        hero_copy: HERO_COPY.to_string(),
        top_spots,
        experience_ideas,
        alerts: destination_alerts(destination, &snapshot.alerts, now),
        road_trip_plan: profile.road_trip_for(&destination.name),
        bike_plan: profile.bike_route_for(&destination.name),
        adventure_highlights: profile.adventure_highlights.to_string(),
        food_highlights: profile.food_highlights.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use crate::profile::DEFAULT_PROFILE;
    use crate::test_support::{request, sample_snapshot};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn cost_estimate_groups_thousands() {
        assert_eq!(
            total_cost_estimate(Budget::Medium, 3),
            "₹2k–₹3k / day · boutique stays + mix of taxis · approx ₹7,500 for 3 day(s)"
        );
        assert!(total_cost_estimate(Budget::High, 7).ends_with("₹26,600 for 7 day(s)"));
    }

    #[test]
    fn flagship_scenario_uses_distinct_overlapping_spots() {
        let snapshot = sample_snapshot();
        let req = request("shimla", 2, &["trekking", "photography"]);
        let response = generate_itinerary(&snapshot, &HiddenGemTags::new(), &req, now()).unwrap();

        assert_eq!(response.destination, "Shimla · North India");
        assert_eq!(response.days.len(), 2);
        let day_one = response.days[0]
            .segments
            .iter()
            .map(|s| s.spot_id.as_str())
            .collect::<HashSet<_>>();
        assert_eq!(day_one.len(), 3);
        assert!(!day_one.contains("mall-road"));
        assert_eq!(response.summary.alerts_applied, 2);
        assert_eq!(response.summary.tagged_hidden_gems, 0);
        assert_eq!(response.summary.interests, req.interests);
        assert!(response.summary.cost_estimate.ends_with("approx ₹3,000 for 2 day(s)"));
    }

    #[test]
    fn every_day_has_ordered_slots_and_zero_first_leg() {
        let snapshot = sample_snapshot();
        for destination in ["shimla", "goa", "Ziro Valley"] {
            let req = request(destination, 4, &["food", "culture"]);
            let response = generate_itinerary(&snapshot, &HiddenGemTags::new(), &req, now()).unwrap();
            assert_eq!(response.days.len(), 4);
            for day in &response.days {
                let slots = day.segments.iter().map(|s| s.time_of_day).collect::<Vec<_>>();
                assert_eq!(slots, TimeSlot::ALL.to_vec());
                assert_eq!(day.segments[0].travel_distance_km, 0.0);
            }
        }
    }

    #[test]
    fn unknown_destination_is_not_found() {
        let snapshot = sample_snapshot();
        let err = generate_itinerary(&snapshot, &HiddenGemTags::new(), &request("atlantis", 2, &["food"]), now())
            .unwrap_err();
        assert_eq!(err, PlanError::not_found("atlantis"));
        assert!(err.to_string().contains("Try one from the region guide."));
    }

    #[test]
    fn invalid_days_fail_before_lookup() {
        let snapshot = sample_snapshot();
        let err = generate_itinerary(&snapshot, &HiddenGemTags::new(), &request("atlantis", 9, &["food"]), now())
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));
    }

    #[test]
    fn generation_is_idempotent() {
        let snapshot = sample_snapshot();
        let mut tags = HiddenGemTags::new();
        tags.insert("goa".to_string(), vec!["insta-2".to_string()]);
        for destination in ["shimla", "goa"] {
            let req = request(destination, 3, &["photography", "nature"]);
            let first = generate_itinerary(&snapshot, &tags, &req, now()).unwrap();
            let second = generate_itinerary(&snapshot, &tags, &req, now()).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn unrecognised_category_uses_default_profile() {
        let snapshot = sample_snapshot();
        let req = request("ziro-valley", 2, &["food"]);
        let response = generate_itinerary(&snapshot, &HiddenGemTags::new(), &req, now()).unwrap();

        assert_eq!(response.summary.food_highlights, DEFAULT_PROFILE.food_highlights);
        assert_eq!(response.summary.hidden_gem_callout, DEFAULT_PROFILE.hidden_gem);
        let stops = response.days[0]
            .segments
            .iter()
            .map(|s| s.food_stop.as_str())
            .collect::<Vec<_>>();
        assert_eq!(stops, DEFAULT_PROFILE.food_stops.to_vec());
        assert_eq!(response.summary.alerts_applied, 3);
    }

    #[test]
    fn admin_tag_surfaces_hidden_gem_in_evenings() {
        let snapshot = sample_snapshot();
        let req = request("goa", 2, &["food"]);
        let untagged = generate_itinerary(&snapshot, &HiddenGemTags::new(), &req, now()).unwrap();
        assert_eq!(untagged.summary.hidden_gem_count, 0);

        let mut tags = HiddenGemTags::new();
        tags.insert("goa".to_string(), vec!["insta-2".to_string()]);
        let tagged = generate_itinerary(&snapshot, &tags, &req, now()).unwrap();
        assert_eq!(tagged.summary.tagged_hidden_gems, 1);
        assert_eq!(tagged.summary.hidden_gem_count, 2);
        assert!(tagged.days.iter().all(|d| d.segments[2].mentions_hidden_gem()));
    }

    #[test]
    fn admin_tag_reaches_flagship_evenings() {
        let snapshot = sample_snapshot();
        let req = request("shimla", 1, &["trekking", "photography"]);
        let mut tags = HiddenGemTags::new();
        tags.insert("shimla".to_string(), vec!["blog-1".to_string()]);
        let response = generate_itinerary(&snapshot, &tags, &req, now()).unwrap();
        assert!(response.days[0].segments[2].mentions_hidden_gem());
    }

    #[test]
    fn snapshot_for_flagship_and_generic() {
        let snapshot = sample_snapshot();
        let shimla = destination_snapshot(&snapshot, "shimla", now()).unwrap();
        assert_eq!(shimla.top_spots.len(), 5);
        assert!(shimla.experience_ideas.is_empty());
        assert_eq!(shimla.tagline, TAGLINE);

        let goa = destination_snapshot(&snapshot, "goa", now()).unwrap();
        assert!(goa.top_spots.is_empty());
        assert_eq!(goa.experience_ideas, vec!["Culture block".to_string(), "Food block".to_string()]);
        assert_eq!(goa.alerts.len(), 3);

        assert!(matches!(
            destination_snapshot(&snapshot, "nowhere", now()),
            Err(PlanError::NotFound { .. })
        ));
    }
}
