use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest price level the Places API reports ("$$$$")
pub const MAX_PRICE_LEVEL: u8 = 4;

/// Business status the Places API uses for places that are currently trading
pub const OPERATIONAL_STATUS: &str = "OPERATIONAL";

/// Reasons a search request can be rejected before any API call is made
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("location must be \"<lat>,<lng>\", got {0:?}")]
    MalformedLocation(String),

    #[error("latitude must be within [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be within [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),

    #[error("distance must be a positive number of miles, got {0}")]
    InvalidDistance(f64),

    #[error("minimum rating must be within (0, 5], got {0}")]
    InvalidRating(f64),

    #[error("minimum review count must be positive, got {0}")]
    InvalidReviewCount(u32),

    #[error("price level must be within 0..=4, got {0}")]
    InvalidPriceLevel(u8),
}

/// A user's search preferences
///
/// Only constructible through [`SearchCriteria::new`], so every instance
/// satisfies the range invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCriteria {
    latitude: f64,
    longitude: f64,
    max_distance_miles: f64,
    min_rating: f64,
    min_review_count: u32,
    max_price_level: Option<u8>,
}

impl SearchCriteria {
    pub fn new(
        latitude: f64,
        longitude: f64,
        max_distance_miles: f64,
        min_rating: f64,
        min_review_count: u32,
        max_price_level: Option<u8>,
    ) -> Result<Self, CriteriaError> {
        // Written as negated ranges so NaN is rejected too
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CriteriaError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CriteriaError::LongitudeOutOfRange(longitude));
        }
        if !(max_distance_miles > 0.0 && max_distance_miles.is_finite()) {
            return Err(CriteriaError::InvalidDistance(max_distance_miles));
        }
        if !(min_rating > 0.0 && min_rating <= 5.0) {
            return Err(CriteriaError::InvalidRating(min_rating));
        }
        if min_review_count == 0 {
            return Err(CriteriaError::InvalidReviewCount(min_review_count));
        }
        if let Some(level) = max_price_level {
            if level > MAX_PRICE_LEVEL {
                return Err(CriteriaError::InvalidPriceLevel(level));
            }
        }

        Ok(Self {
            latitude,
            longitude,
            max_distance_miles,
            min_rating,
            min_review_count,
            max_price_level,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn max_distance_miles(&self) -> f64 {
        self.max_distance_miles
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn min_review_count(&self) -> u32 {
        self.min_review_count
    }

    pub fn max_price_level(&self) -> Option<u8> {
        self.max_price_level
    }
}

/// Parse a `"<lat>,<lng>"` pair as sent by the browser client
pub fn parse_location(location: &str) -> Result<(f64, f64), CriteriaError> {
    let malformed = || CriteriaError::MalformedLocation(location.to_string());

    let (lat, lng) = location.split_once(',').ok_or_else(malformed)?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lng: f64 = lng.trim().parse().map_err(|_| malformed())?;

    Ok((lat, lng))
}

/// One place as returned by the Places Nearby Search endpoint
///
/// Every field is optional: the filter decides what a usable record is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl RawCandidate {
    pub fn open_now(&self) -> Option<bool> {
        self.opening_hours.as_ref().and_then(|hours| hours.open_now)
    }

    pub fn coordinates(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|geometry| geometry.location)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant that passed every filter, in the shape returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredResult {
    pub name: String,
    pub stars: f64,
    pub reviews: u32,
    /// Miles from the search origin
    pub distance: f64,
    pub price_level: Option<u8>,
    pub open_now: bool,
    pub place_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_accepts_valid_input() {
        let criteria = SearchCriteria::new(42.373, -71.118, 1.5, 4.0, 1000, Some(2)).unwrap();
        assert_eq!(criteria.max_price_level(), Some(2));
        assert_eq!(criteria.min_review_count(), 1000);
    }

    #[test]
    fn test_criteria_rejects_each_field() {
        assert_eq!(
            SearchCriteria::new(91.0, 0.0, 1.0, 4.0, 1, None),
            Err(CriteriaError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            SearchCriteria::new(0.0, -181.0, 1.0, 4.0, 1, None),
            Err(CriteriaError::LongitudeOutOfRange(-181.0))
        );
        assert_eq!(
            SearchCriteria::new(0.0, 0.0, 0.0, 4.0, 1, None),
            Err(CriteriaError::InvalidDistance(0.0))
        );
        assert_eq!(
            SearchCriteria::new(0.0, 0.0, 1.0, 5.5, 1, None),
            Err(CriteriaError::InvalidRating(5.5))
        );
        assert_eq!(
            SearchCriteria::new(0.0, 0.0, 1.0, 4.0, 0, None),
            Err(CriteriaError::InvalidReviewCount(0))
        );
        assert_eq!(
            SearchCriteria::new(0.0, 0.0, 1.0, 4.0, 1, Some(5)),
            Err(CriteriaError::InvalidPriceLevel(5))
        );
    }

    #[test]
    fn test_criteria_rejects_nan() {
        assert!(SearchCriteria::new(f64::NAN, 0.0, 1.0, 4.0, 1, None).is_err());
        assert!(SearchCriteria::new(0.0, 0.0, f64::NAN, 4.0, 1, None).is_err());
        assert!(SearchCriteria::new(0.0, 0.0, 1.0, f64::NAN, 1, None).is_err());
    }

    #[test]
    fn test_rating_upper_bound_is_inclusive() {
        assert!(SearchCriteria::new(0.0, 0.0, 1.0, 5.0, 1, None).is_ok());
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location("42.373,-71.118"), Ok((42.373, -71.118)));
        assert_eq!(parse_location(" 42.373 , -71.118 "), Ok((42.373, -71.118)));
        assert!(matches!(
            parse_location("42.373"),
            Err(CriteriaError::MalformedLocation(_))
        ));
        assert!(matches!(
            parse_location("north,west"),
            Err(CriteriaError::MalformedLocation(_))
        ));
    }

    #[test]
    fn test_raw_candidate_tolerates_missing_fields() {
        let candidate: RawCandidate =
            serde_json::from_value(serde_json::json!({ "name": "Nameless" })).unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Nameless"));
        assert_eq!(candidate.open_now(), None);
        assert_eq!(candidate.coordinates(), None);
    }

    #[test]
    fn test_filtered_result_wire_names() {
        let result = FilteredResult {
            name: "Russell House Tavern".to_string(),
            stars: 4.3,
            reviews: 2520,
            distance: 0.17,
            price_level: Some(2),
            open_now: true,
            place_id: "ChIJ2w69uEJ344kRKVe3Zf0YBK8".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["price_level"], 2);
        assert_eq!(json["open_now"], true);
        assert_eq!(json["place_id"], "ChIJ2w69uEJ344kRKVe3Zf0YBK8");
    }
}
