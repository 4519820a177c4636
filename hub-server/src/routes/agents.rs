use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use shared::error::{ApiError, ApiResult};
use shared::models::DeliveryAgent;
use shared::response::ApiResponse;

use crate::core::ServerState;
use crate::store::StoreError;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/delivery-agents", get(list_agents))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    branch_id: String,
}

async fn list_agents(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DeliveryAgent>>>> {
    let agents = state
        .store
        .get_delivery_agents(&query.branch_id)
        .await
        .map_err(store_to_api)?;
    Ok(Json(ApiResponse::ok(agents)))
}

pub(super) fn store_to_api(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound { resource, .. } => ApiError::not_found(resource),
        StoreError::InvalidDocument(msg) => ApiError::validation(msg),
        StoreError::Unavailable(msg) => ApiError::store(msg),
    }
}
