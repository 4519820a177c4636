use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use shared::error::ApiResult;
use shared::models::Branch;
use shared::response::ApiResponse;

use crate::core::ServerState;

use super::agents::store_to_api;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/branches", get(list_branches))
}

async fn list_branches(
    State(state): State<ServerState>,
) -> ApiResult<Json<ApiResponse<Vec<Branch>>>> {
    let branches = state.store.get_branches().await.map_err(store_to_api)?;
    Ok(Json(ApiResponse::ok(branches)))
}
