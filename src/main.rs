use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use find_me_food::config::{LoggingSettings, Settings};
use find_me_food::core::{FoodFinder, PageAggregator};
use find_me_food::models::ErrorResponse;
use find_me_food::routes::{self, food::AppState};
use find_me_food::services::PlacesClient;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for malformed query strings
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Query payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

fn init_logging(logging: &LoggingSettings) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&logging.level))
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Settings come first so the [logging] section can configure the subscriber
    let loaded = Settings::load();
    let logging = loaded
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default()
        .with_env_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok());
    init_logging(&logging);

    info!("Starting Find Me Food service...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    if settings.places.api_key.is_empty() {
        error!("No Places API key configured (set GMAPS_API_KEY)");
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "missing Places API key",
        ));
    }

    info!("Configuration loaded successfully");

    let places = PlacesClient::new(
        settings.places.base_url.clone(),
        settings.places.api_key.clone(),
        settings.places.timeout(),
    )
    .map_err(|e| {
        error!("Failed to create Places client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Places client initialized ({})", settings.places.base_url);

    let aggregator = PageAggregator::new(
        settings.search.max_pages,
        settings.search.page_token_delay(),
        settings.search.place_type.clone(),
    );
    let finder = FoodFinder::new(aggregator, settings.search.enforce_max_distance);

    info!(
        "Finder initialized (max pages: {}, token delay: {}ms)",
        settings.search.max_pages, settings.search.page_token_delay_ms
    );

    let app_state = AppState {
        places: Arc::new(places),
        finder,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
