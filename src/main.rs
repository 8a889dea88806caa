use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use volunteer_match::config::{LogFormat, Settings};
use volunteer_match::routes::{self, AppState};
use volunteer_match::services::{AppwriteClient, AppwriteCollections, MatchCache, PostgresClient};

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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration before logging so its level/format apply; report failures after
    let settings = Settings::load();
    let (default_level, default_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };

    let log_level = std::env::var("LOG_LEVEL").unwrap_or(default_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(default_format);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match LogFormat::parse(&log_format) {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting volunteer matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io_error(format!("Configuration error: {}", e))
    })?;

    info!("Configuration loaded successfully");

    let appwrite_collections = AppwriteCollections {
        profiles: settings.collection.profiles,
        events: settings.collection.events,
    };

    let appwrite = AppwriteClient::new(
        settings.appwrite.endpoint,
        settings.appwrite.api_key,
        settings.appwrite.project_id,
        settings.appwrite.database_id,
        appwrite_collections,
        settings.matching.page_size,
    )
    .map_err(|e| {
        error!("Failed to create Appwrite client: {}", e);
        io_error(format!("Appwrite client error: {}", e))
    })?;
    let appwrite = Arc::new(appwrite);

    info!("Appwrite client initialized");

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = if settings.matching.cache_results {
        let cache = MatchCache::connect(&settings.cache.redis_url, l1_cache_size, cache_ttl).await;
        info!(
            "Match cache initialized (L1: {} entries, TTL: {}s, Redis: {})",
            l1_cache_size,
            cache_ttl,
            cache.is_shared()
        );
        Some(Arc::new(cache))
    } else {
        info!("Match caching disabled");
        None
    };

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = PostgresClient::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io_error(format!("PostgreSQL connection error: {}", e))
    })?;
    let postgres = Arc::new(postgres);

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let app_state = AppState {
        appwrite,
        cache,
        postgres,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
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
