use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ErrorResponse, FindFoodQuery, HealthResponse, PlaceUrlQuery, PlaceUrlResponse, SearchCriteria};
use crate::services::PlacesApi;
use crate::core::FoodFinder;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<dyn PlacesApi>,
    pub finder: FoodFinder,
}

/// Configure all food search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/findfood", web::get().to(find_food))
        .route("/geturl", web::get().to(get_url));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find open restaurants nearby
///
/// GET /api/v1/findfood?location=42.373,-71.118&distance=1.5&stars=4&reviews=1000&price=2
///
/// Returns a JSON array of results in no particular order.
async fn find_food(
    state: web::Data<AppState>,
    query: web::Query<FindFoodQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for findfood request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let criteria = match SearchCriteria::try_from(&*query) {
        Ok(criteria) => criteria,
        Err(e) => {
            tracing::info!("Rejected findfood criteria: {}", e);
            return bad_request("Invalid search criteria", e.to_string());
        }
    };

    tracing::info!(
        "Finding food near {},{} within {} miles (stars >= {}, reviews >= {}, price <= {:?})",
        criteria.latitude(),
        criteria.longitude(),
        criteria.max_distance_miles(),
        criteria.min_rating(),
        criteria.min_review_count(),
        criteria.max_price_level()
    );

    match state.finder.find_food(state.places.as_ref(), &criteria).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} restaurants (from {} candidates)",
                result.results.len(),
                result.total_candidates
            );
            HttpResponse::Ok().json(result.results)
        }
        Err(e) => {
            tracing::error!("Nearby search failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to search nearby restaurants".to_string(),
                message: "The places search service is unavailable".to_string(),
                status_code: 502,
            })
        }
    }
}

/// Resolve a place id to its Google Maps URL
///
/// GET /api/v1/geturl?place_id={placeId}
async fn get_url(
    state: web::Data<AppState>,
    query: web::Query<PlaceUrlQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    match state.places.place_url(&query.place_id).await {
        Ok(url) => HttpResponse::Ok().json(PlaceUrlResponse { url }),
        Err(e) => {
            tracing::error!("Failed to fetch url for {}: {}", query.place_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error fetching url from Google Places API".to_string(),
                message: "The place details service is unavailable".to_string(),
                status_code: 500,
            })
        }
    }
}
