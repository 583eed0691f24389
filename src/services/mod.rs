// Service exports
pub mod places;

pub use places::{NearbyPage, NearbySearchRequest, PlacesApi, PlacesClient, PlacesError, DEFAULT_BASE_URL};
