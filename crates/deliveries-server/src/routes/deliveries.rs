use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use deliveries_core::delivery::{Delivery, DeliveryInput};
use deliveries_service::DeliveryService;

use super::AppState;
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/deliveries", post(create_delivery).get(list_deliveries))
        .route(
            "/api/deliveries/{id}",
            get(get_delivery).put(update_delivery).delete(delete_delivery),
        )
        .route(
            "/api/deliveries/project/{project_id}",
            get(list_deliveries_by_project),
        )
}

// A `null` body deserializes to `None` and is rejected by the validator.
type Body = Result<Json<Option<DeliveryInput>>, JsonRejection>;

async fn create_delivery(
    State(state): State<AppState>,
    body: Body,
) -> Result<Json<Delivery>, ApiError> {
    let Json(input) = body?;
    state
        .service
        .create_delivery(input.as_ref())
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn list_deliveries(State(state): State<AppState>) -> Result<Json<Vec<Delivery>>, ApiError> {
    state
        .service
        .list_deliveries()
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn get_delivery(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Delivery>, ApiError> {
    let Path(id) = id?;
    state
        .service
        .get_delivery(Some(id))
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn update_delivery(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Body,
) -> Result<Json<Delivery>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = body?;
    state
        .service
        .update_delivery_fields(Some(id), patch.as_ref())
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn delete_delivery(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state
        .service
        .delete_delivery(Some(id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(ApiError::from)
}

async fn list_deliveries_by_project(
    State(state): State<AppState>,
    project_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Delivery>>, ApiError> {
    let Path(project_id) = project_id?;
    state
        .service
        .list_deliveries_by_project(Some(project_id))
        .await
        .map(Json)
        .map_err(ApiError::from)
}
