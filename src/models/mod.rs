// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    parse_location, CriteriaError, FilteredResult, Geometry, LatLng, OpeningHours, RawCandidate,
    SearchCriteria, MAX_PRICE_LEVEL, OPERATIONAL_STATUS,
};
pub use requests::{FindFoodQuery, PlaceUrlQuery};
pub use responses::{ErrorResponse, HealthResponse, PlaceUrlResponse};
