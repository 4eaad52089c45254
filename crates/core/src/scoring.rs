use std::collections::HashSet;

use crate::models::{Budget, Spot};

/// Score assigned to spots sharing no tag with the requested interests.
pub const NO_OVERLAP_SCORE: f64 = 0.5;

/// Dedups and lower-cases interests, preserving first-seen order.
/// An empty result falls back to `culture`.
pub fn normalize_interests<S: AsRef<str>>(interests: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for interest in interests {
        let key = interest.as_ref().trim().to_lowercase();
        if !key.is_empty() && seen.insert(key.clone()) {
            ordered.push(key);
        }
    }

    if ordered.is_empty() {
        ordered.push("culture".to_string());
    }
    ordered
}

pub fn interest_overlap(spot: &Spot, interests: &[String]) -> usize {
    let tags = spot
        .tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .collect::<HashSet<_>>();
    let wanted = interests.iter().map(String::as_str).collect::<HashSet<_>>();
    tags.iter().filter(|tag| wanted.contains(tag.as_str())).count()
}

/// Desirability of a spot for this traveler; higher is better.
pub fn score_spot(spot: &Spot, interests: &[String], traveler_type: &str, budget: Budget) -> f64 {
    let overlap = interest_overlap(spot, interests);
    if overlap == 0 {
        return NO_OVERLAP_SCORE;
    }

    let crowd = f64::from(spot.crowd_score);
    let base = 50.0 + 12.0 * overlap as f64;
    // Couples and families get the smaller constant.
    let crowd_factor = match traveler_type.trim().to_lowercase().as_str() {
        "couple" | "family" => 10.0 - crowd,
        _ => 12.0 - crowd,
    };
    let budget_bonus = if budget == Budget::Low && spot.entry_fee.to_lowercase().contains("free") {
        5.0
    } else {
        0.0
    };
    let gem_bonus = if spot.is_hidden_gem { 15.0 } else { 0.0 };

    base + crowd_factor + budget_bonus + gem_bonus
}

/// Spots ordered by descending score; equal scores keep load order.
pub fn rank_spots<'a>(
    spots: &'a [Spot],
    interests: &[String],
    traveler_type: &str,
    budget: Budget,
) -> Vec<&'a Spot> {
    let mut scored = spots
        .iter()
        .map(|spot| (score_spot(spot, interests, traveler_type, budget), spot))
        .collect::<Vec<_>>();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored.into_iter().map(|(_, spot)| spot).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spot;

    fn interests(values: &[&str]) -> Vec<String> {
        normalize_interests(values)
    }

    #[test]
    fn normalizes_and_dedups() {
        assert_eq!(
            normalize_interests(&["Trekking", " food ", "trekking", ""]),
            vec!["trekking".to_string(), "food".to_string()]
        );
        assert_eq!(normalize_interests(&["  "]), vec!["culture".to_string()]);
        assert_eq!(normalize_interests::<&str>(&[]), vec!["culture".to_string()]);
    }

    #[test]
    fn zero_overlap_is_flat_regardless_of_bonuses() {
        let mut gem = spot("gem", &["shopping"], 1, "Free");
        gem.is_hidden_gem = true;
        assert_eq!(score_spot(&gem, &interests(&["trekking"]), "solo", Budget::Low), 0.5);
        assert_eq!(score_spot(&gem, &interests(&["trekking"]), "family", Budget::High), 0.5);
    }

    #[test]
    fn overlap_is_case_insensitive() {
        let ridge = spot("ridge", &["Photography", "CULTURE"], 5, "₹50");
        assert_eq!(interest_overlap(&ridge, &interests(&["photography", "culture"])), 2);
    }

    #[test]
    fn applies_base_crowd_budget_and_gem_terms() {
        let mut trail = spot("trail", &["trekking", "photography"], 3, "Free entry");
        // 50 + 24 + (12 - 3) + 5
        assert_eq!(
            score_spot(&trail, &interests(&["trekking", "photography"]), "solo", Budget::Low),
            88.0
        );
        trail.is_hidden_gem = true;
        assert_eq!(
            score_spot(&trail, &interests(&["trekking", "photography"]), "solo", Budget::Medium),
            98.0
        );
    }

    #[test]
    fn couple_and_family_use_the_smaller_crowd_constant() {
        let quiet = spot("quiet", &["nature"], 2, "₹20");
        let wanted = interests(&["nature"]);
        let solo = score_spot(&quiet, &wanted, "solo", Budget::Medium);
        let couple = score_spot(&quiet, &wanted, "Couple", Budget::Medium);
        let family = score_spot(&quiet, &wanted, "FAMILY", Budget::Medium);
        assert_eq!(solo - couple, 2.0);
        assert_eq!(couple, family);
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let spots = vec![
            spot("a", &["food"], 5, "₹10"),
            spot("b", &["food"], 5, "₹10"),
            spot("c", &["food"], 1, "₹10"),
            spot("d", &["shopping"], 0, "Free"),
        ];
        let ranked = rank_spots(&spots, &interests(&["food"]), "solo", Budget::Medium)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec!["c", "a", "b", "d"]);
    }
}
