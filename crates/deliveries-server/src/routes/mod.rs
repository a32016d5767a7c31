pub mod deliveries;
pub mod health;
pub mod openapi;

use std::sync::Arc;

use axum::Router;
use deliveries_service::LocalService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct InnerAppState {
    pub service: LocalService,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(service: LocalService) -> Router {
    let state = Arc::new(InnerAppState { service });

    Router::new()
        .merge(health::routes())
        .merge(deliveries::routes())
        .merge(openapi::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
