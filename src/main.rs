use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use platesense::config::Settings;
use platesense::core::{HealthScorer, MealAnalyzer, Normalizer, NutritionTable};
use platesense::routes;
use platesense::routes::AppState;
use platesense::services::{AdviceCache, DetectorClient, LlmClient, MemoryInventory};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt().with_target(false).with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting PlateSense analysis service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize detector client
    let detector = Arc::new(DetectorClient::new(
        settings.detector.endpoints.clone(),
        settings.detector.confidence_threshold,
        settings.detector.timeout_secs,
    ));

    info!(
        "Detector client initialized ({} backends, threshold {})",
        settings.detector.endpoints.len(),
        settings.detector.confidence_threshold
    );

    // Initialize advice generator client
    let llm = Arc::new(LlmClient::new(
        settings.llm.endpoint,
        settings.llm.api_key,
        settings.llm.model,
        settings.llm.max_tokens,
        settings.llm.timeout_secs,
    ));

    info!("Advice generator client initialized");

    // Initialize advice cache
    let advice_cache = Arc::new(AdviceCache::new(
        settings.cache.advice_max_entries,
        settings.cache.advice_ttl_secs,
    ));

    info!(
        "Advice cache initialized ({} entries, TTL: {}s)",
        settings.cache.advice_max_entries, settings.cache.advice_ttl_secs
    );

    // Initialize analyzer with configured thresholds
    let thresholds = settings.scoring.thresholds.clone();
    let analyzer = MealAnalyzer::new(
        Normalizer::with_defaults(),
        NutritionTable::with_defaults(),
        HealthScorer::new(thresholds.into()),
    );

    info!("Meal analyzer initialized");

    // Build application state
    let app_state = AppState {
        analyzer,
        detector,
        llm,
        advice_cache,
        inventory: Arc::new(MemoryInventory::new()),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
