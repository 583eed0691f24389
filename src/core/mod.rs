// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod finder;
pub mod location;
pub mod paginator;
pub mod projector;

pub use distance::{distance_miles, miles_to_meters};
pub use filters::{eligible, is_eligible, EligibleCandidate};
pub use finder::{FindResult, FoodFinder};
pub use location::{LocationError, LocationFailure, LocationState, LocationTracker};
pub use paginator::PageAggregator;
pub use projector::project;
