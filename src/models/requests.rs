use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{parse_location, CriteriaError, SearchCriteria};

/// Query string accepted by `GET /api/v1/findfood`
///
/// `location` is `"<lat>,<lng>"`, `distance` is in miles.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindFoodQuery {
    #[validate(length(min = 3))]
    pub location: String,
    #[validate(range(exclusive_min = 0.0))]
    pub distance: f64,
    #[validate(range(exclusive_min = 0.0, max = 5.0))]
    pub stars: f64,
    #[validate(range(min = 1))]
    pub reviews: u32,
    #[serde(default, alias = "maxPrice")]
    #[validate(range(max = 4))]
    pub price: Option<u8>,
}

impl TryFrom<&FindFoodQuery> for SearchCriteria {
    type Error = CriteriaError;

    fn try_from(query: &FindFoodQuery) -> Result<Self, Self::Error> {
        let (latitude, longitude) = parse_location(&query.location)?;
        SearchCriteria::new(
            latitude,
            longitude,
            query.distance,
            query.stars,
            query.reviews,
            query.price,
        )
    }
}

/// Query string accepted by `GET /api/v1/geturl`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceUrlQuery {
    #[validate(length(min = 1))]
    pub place_id: String,
}
