pub mod logging;
pub mod routes;
pub mod state;

use crate::{
    config::Config,
    db::Db,
    errors::{ApiError, AppError},
    middlewares::errors::error_middleware,
    tron::TronGrid,
};
use axum::{Router, middleware::from_fn};
use routes::get_api_routes;
use state::AppState;
use std::sync::Arc;
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer};
use tracing::info;

/// Builds and configures the Axum `Router`.
/// Opens the database, runs pending migrations and prepares the TronGrid client.
pub async fn build(config: Arc<Config>) -> Result<(Router, AppState), AppError> {
    let store = Db::new(&config.database_url, config.max_db_connections).await?;
    let tron = TronGrid::from_config(&config)?;

    info!(
        network = %config.network,
        endpoint = %tron.base_url(),
        "Using TRON node"
    );

    let app_state = AppState::new(config, Arc::new(tron), Arc::new(store));

    Ok((build_router(app_state.clone()), app_state))
}

/// Wraps the API routes with error handling, CORS and trailing slash normalization.
pub fn build_router(app_state: AppState) -> Router {
    let inner = get_api_routes()
        .with_state(app_state)
        .layer(from_fn(error_middleware))
        .layer(CorsLayer::permissive())
        .fallback(ApiError::not_found());

    let inner = NormalizePathLayer::trim_trailing_slash().layer(inner);

    Router::new().fallback_service(inner)
}
