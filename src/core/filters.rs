use crate::models::{LatLng, RawCandidate, SearchCriteria, OPERATIONAL_STATUS};

/// A candidate that passed every filter, with the fields projection needs
/// already extracted
///
/// Borrowing from the raw record keeps projection a total function: there is
/// no way to hand the projector a candidate that is missing a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibleCandidate<'a> {
    pub name: &'a str,
    pub place_id: &'a str,
    pub rating: f64,
    pub review_count: u32,
    pub price_level: Option<u8>,
    pub open_now: bool,
    pub location: LatLng,
}

/// Check that a place is trading and open right now
#[inline]
pub fn is_open(candidate: &RawCandidate) -> bool {
    candidate.business_status.as_deref() == Some(OPERATIONAL_STATUS)
        && candidate.open_now() == Some(true)
}

/// Check rating and review count against the user's minimums (both inclusive)
#[inline]
pub fn meets_quality(rating: f64, review_count: u32, criteria: &SearchCriteria) -> bool {
    rating >= criteria.min_rating() && review_count >= criteria.min_review_count()
}

/// Check the price level against the user's maximum, if one was given
///
/// Places without a price level always pass.
#[inline]
pub fn within_price(price_level: Option<u8>, criteria: &SearchCriteria) -> bool {
    match (criteria.max_price_level(), price_level) {
        (Some(max), Some(level)) => level <= max,
        _ => true,
    }
}

/// Run every filter over a raw candidate
///
/// Returns `None` for ineligible or malformed records.
pub fn eligible<'a>(
    candidate: &'a RawCandidate,
    criteria: &SearchCriteria,
) -> Option<EligibleCandidate<'a>> {
    if !is_open(candidate) {
        return None;
    }

    let rating = candidate.rating?;
    let review_count = candidate.user_ratings_total?;
    if !meets_quality(rating, review_count, criteria) {
        return None;
    }

    if !within_price(candidate.price_level, criteria) {
        return None;
    }

    Some(EligibleCandidate {
        name: candidate.name.as_deref()?,
        place_id: candidate.place_id.as_deref()?,
        rating,
        review_count,
        price_level: candidate.price_level,
        open_now: candidate.open_now()?,
        location: candidate.coordinates()?,
    })
}

/// Whether a raw candidate satisfies all active filter criteria
#[inline]
pub fn is_eligible(candidate: &RawCandidate, criteria: &SearchCriteria) -> bool {
    eligible(candidate, criteria).is_some()
}
