use crate::error::PlanError;
use crate::models::ItineraryRequest;

pub const MIN_DAYS: u8 = 1;
pub const MAX_DAYS: u8 = 7;

/// Rejects requests the planner must never see. Budget tiers are enforced by
/// deserialisation, so only day count, destination and interests are checked here.
pub fn validate_request(request: &ItineraryRequest) -> Result<(), PlanError> {
    if request.destination.trim().is_empty() {
        return Err(PlanError::Validation("destination must not be empty".to_string()));
    }
    if !(MIN_DAYS..=MAX_DAYS).contains(&request.days) {
        return Err(PlanError::Validation(format!(
            "days must be between {MIN_DAYS} and {MAX_DAYS}, got {}",
            request.days
        )));
    }
    if request.interests.is_empty() {
        return Err(PlanError::Validation("at least one interest is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::request;

    #[test]
    fn accepts_bounds() {
        let mut req = request("shimla", 1, &["trekking"]);
        assert!(validate_request(&req).is_ok());
        req.days = 7;
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn rejects_out_of_range_days() {
        for days in [0, 8] {
            let req = request("shimla", days, &["trekking"]);
            assert!(matches!(validate_request(&req), Err(PlanError::Validation(_))));
        }
    }

    #[test]
    fn rejects_empty_interests_and_destination() {
        assert!(validate_request(&request("shimla", 2, &[])).is_err());
        assert!(validate_request(&request("  ", 2, &["food"])).is_err());
    }
}
