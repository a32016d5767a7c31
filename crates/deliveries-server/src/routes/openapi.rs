use axum::{http::header, response::IntoResponse, routing::get, Router};

use super::AppState;

const OPENAPI_YAML: &str = include_str!("../../openapi/openapi.yaml");

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/openapi", get(openapi))
}

async fn openapi() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml; charset=utf-8")],
        OPENAPI_YAML,
    )
}
