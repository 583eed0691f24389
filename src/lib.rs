//! Find Me Food - nearby open restaurant search
//!
//! This library pages through the Google Places Nearby Search API, filters
//! the places by opening status, rating, review count and price, and returns
//! them with their distance from the user.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance_miles, FoodFinder, PageAggregator};
pub use models::{CriteriaError, FilteredResult, RawCandidate, SearchCriteria};
pub use services::{PlacesApi, PlacesClient, PlacesError};
