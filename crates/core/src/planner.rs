use std::collections::HashSet;

use crate::alerts::summarize_alerts;
use crate::error::PlanError;
use crate::models::{Alert, Budget, DayPlan, DayRationale, ItinerarySegment, Spot, TimeSlot};
use crate::scoring::{interest_overlap, rank_spots};
use crate::segment::{
    build_interest_segment, build_spot_segment, SegmentContext, SynthesizedSegment,
    GENERIC_START_SUGGESTION,
};

const REQUESTED_INTEREST_BOOST: u8 = 8;

/// Daily theme picked from the first matching interest family.
pub fn daily_theme(day_idx: usize, destination_name: &str, interests: &[String]) -> String {
    let has = |tag: &str| interests.iter().any(|interest| interest == tag);
    let focus = if has("trekking") || has("adventure") {
        "trail mornings & adrenaline afternoons"
    } else if has("food") {
        "tasting crawls & cafe sunsets"
    } else if has("culture") {
        "heritage walks & night bazaars"
    } else if has("relaxation") {
        "slow mornings & spa-toned evenings"
    } else if has("nature") {
        "forest baths & river breezes"
    } else {
        "balanced highlights"
    };
    format!("{destination_name} · {focus} (Day {})", day_idx + 1)
}

fn spotlight_hidden_gem(segments: &[ItinerarySegment]) -> String {
    segments
        .iter()
        .find(|segment| segment.mentions_hidden_gem())
        .map(|segment| format!("{} — linger 20 extra minutes for exclusive frames.", segment.title))
        .unwrap_or_else(|| "Focus on marquee highlights today.".to_string())
}

/// Arranges segments into day plans for one trip.
pub struct DayPlanner<'a> {
    ctx: SegmentContext<'a>,
    budget: Budget,
    /// Interests as the traveler sent them, lower-cased, without the `culture` fallback.
    requested: &'a [String],
    safety: String,
}

impl<'a> DayPlanner<'a> {
    pub fn new(
        ctx: SegmentContext<'a>,
        budget: Budget,
        requested: &'a [String],
        alerts: &[Alert],
    ) -> Self {
        Self {
            ctx,
            budget,
            requested,
            safety: summarize_alerts(alerts),
        }
    }

    fn rationale(&self, hidden_gem: String) -> DayRationale {
        let name = &self.ctx.destination.name;
        DayRationale {
            cost_estimate: self.budget.daily_cost_text().to_string(),
            safety: self.safety.clone(),
            road_trip: self.ctx.profile.road_trip_for(name),
            bike_route: self.ctx.profile.bike_route_for(name),
            hidden_gem,
        }
    }

    fn day_plan(&self, day_idx: usize, segments: Vec<ItinerarySegment>, hidden_gem: String) -> DayPlan {
        DayPlan {
            day: (day_idx + 1) as u8,
            theme: daily_theme(day_idx, &self.ctx.destination.name, self.ctx.interests),
            segments,
            why_plan: self.rationale(hidden_gem),
        }
    }

    /// Rich path. Each slot takes the best-ranked unused spot sharing an interest,
    /// then any unused spot in load order. The used set resets only once every
    /// spot has appeared.
    pub fn plan_spot_days(&self, spots: &[Spot], days: u8) -> Result<Vec<DayPlan>, PlanError> {
        if spots.is_empty() {
            return Err(PlanError::DataIntegrity(format!(
                "no spots loaded for flagship destination '{}'",
                self.ctx.destination.id
            )));
        }

        let interests = self.ctx.interests;
        let ranked = rank_spots(spots, interests, self.ctx.traveler_type, self.budget);
        let mut used: HashSet<&str> = HashSet::new();
        let mut plans = Vec::with_capacity(usize::from(days));

        for day_idx in 0..usize::from(days) {
            let mut segments = Vec::with_capacity(TimeSlot::ALL.len());
            let mut previous = None;

            for (slot_idx, slot) in TimeSlot::ALL.into_iter().enumerate() {
                if spots.iter().all(|spot| used.contains(spot.id.as_str())) {
                    used.clear();
                }

                let pick = ranked
                    .iter()
                    .copied()
                    .find(|spot| !used.contains(spot.id.as_str()) && interest_overlap(spot, interests) > 0)
                    .or_else(|| spots.iter().find(|spot| !used.contains(spot.id.as_str())))
                    .unwrap_or(&spots[slot_idx % spots.len()]);
                used.insert(pick.id.as_str());

                segments.push(build_spot_segment(&self.ctx, pick, slot, previous, slot_idx + day_idx));
                previous = Some(pick.coordinates());
            }

            let hidden_gem = spotlight_hidden_gem(&segments);
            plans.push(self.day_plan(day_idx, segments, hidden_gem));
        }

        Ok(plans)
    }

    /// Synthesized candidates, twice the slots needed, walking interests × slots.
    fn synthesized_pool(&self, days: u8) -> Vec<SynthesizedSegment> {
        let target = usize::from(days) * TimeSlot::ALL.len() * 2;
        let mut pool = Vec::with_capacity(target);
        let mut sequence = 0;

        'fill: loop {
            for interest in self.ctx.interests {
                for slot in TimeSlot::ALL {
                    pool.push(build_interest_segment(&self.ctx, interest, slot, sequence));
                    sequence += 1;
                    if pool.len() >= target {
                        break 'fill;
                    }
                }
            }
            if self.ctx.interests.is_empty() {
                break;
            }
        }
        pool
    }

    /// Generic path: draws synthesized segments in order, wrapping if the pool runs out.
    pub fn plan_synthesized_days(&self, days: u8) -> Vec<DayPlan> {
        let pool = self.synthesized_pool(days);
        let hidden_gem = if self.ctx.hidden_gem_tagged {
            self.ctx.profile.hidden_gem.to_string()
        } else {
            "Hidden gem sourced from travel OS recommendations.".to_string()
        };

        let mut cursor = pool.iter().cycle();
        let mut plans = Vec::with_capacity(usize::from(days));
        for day_idx in 0..usize::from(days) {
            let mut segments = Vec::with_capacity(TimeSlot::ALL.len());
            for slot_idx in 0..TimeSlot::ALL.len() {
                let Some(drawn) = cursor.next() else { break };
                let mut segment = drawn.segment.clone();
                if slot_idx == 0 {
                    segment.travel_distance_km = 0.0;
                    segment.travel_suggestion = GENERIC_START_SUGGESTION.to_string();
                }
                if self.requested.contains(&drawn.interest) {
                    segment.interest_match_score =
                        (segment.interest_match_score + REQUESTED_INTEREST_BOOST).min(10);
                }
                segments.push(segment);
            }
            plans.push(self.day_plan(day_idx, segments, hidden_gem.clone()));
        }
        plans
    }
}
