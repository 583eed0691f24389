use crate::core::distance::distance_miles;
use crate::core::filters::EligibleCandidate;
use crate::models::{FilteredResult, SearchCriteria};

/// Map an eligible candidate into the client-facing result, attaching its
/// distance from the search origin
#[inline]
pub fn project(candidate: &EligibleCandidate<'_>, criteria: &SearchCriteria) -> FilteredResult {
    FilteredResult {
        name: candidate.name.to_string(),
        stars: candidate.rating,
        reviews: candidate.review_count,
        distance: distance_miles(
            criteria.latitude(),
            criteria.longitude(),
            candidate.location.lat,
            candidate.location.lng,
        ),
        price_level: candidate.price_level,
        open_now: candidate.open_now,
        place_id: candidate.place_id.to_string(),
    }
}
