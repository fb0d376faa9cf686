use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, StorageConfig},
    database,
    error::{AppError, Result},
    repository::{InMemoryProductRepository, PgProductRepository, ProductRepository},
    routes,
    services::product_service::ProductService,
};

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(repo),
        }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let repo: Arc<dyn ProductRepository> = match &config.storage {
        StorageConfig::Postgres(db) => {
            let pool = database::create_pool(db).await?;
            Arc::new(PgProductRepository::new(pool))
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(InMemoryProductRepository::new())
        }
    };

    router(AppState::new(repo), config)
}

/// Wires routes and layers around an already constructed state.
pub fn router(state: AppState, config: &AppConfig) -> Result<Router> {
    let allow_origin = if config.cors.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allow_origin);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
