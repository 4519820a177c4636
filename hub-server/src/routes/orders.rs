//! Orders board routes: listing, lifecycle commands, gates, and
//! admin maintenance.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::error::{ApiError, ApiResult};
use shared::models::{Order, OrderStatus, StatusFilter};
use shared::order::{
    CommandError, CommandErrorCode, OrderCommand, OrderCommandPayload,
};
use shared::response::ApiResponse;
use shared::util::whatsapp_link;

use crate::core::ServerState;
use crate::orders::DispatchCandidate;
use crate::orders::manager::ManagerError;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(list_orders))
        .route("/api/orders/reset", post(reset_orders))
        .route("/api/orders/{id}", get(get_order).delete(delete_order))
        .route("/api/orders/{id}/status", post(update_status))
        .route("/api/orders/{id}/authorize-transfer", post(authorize_transfer))
        .route("/api/orders/{id}/approve", post(approve_order))
        .route("/api/orders/{id}/dispatch-candidates", get(dispatch_candidates))
        .route("/api/orders/{id}/whatsapp-link", get(whatsapp_link_for_order))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    branch_id: Option<String>,
    #[serde(default)]
    status: StatusFilter,
}

async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state
        .board_orders(query.branch_id.as_deref(), query.status)
        .await
        .map_err(manager_to_api)?;
    Ok(Json(ApiResponse::ok(orders)))
}

async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = state.orders.get_order(&id).await.map_err(manager_to_api)?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Status change request. `delivery_id` is required when moving to
/// dispatched, ignored otherwise.
#[derive(Debug, Deserialize, Validate)]
struct UpdateStatusRequest {
    status: OrderStatus,
    delivery_id: Option<String>,
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
    user_name: Option<String>,
}

async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let payload = match req.status {
        OrderStatus::Preparing => OrderCommandPayload::StartPreparing { order_id: id },
        OrderStatus::Ready => OrderCommandPayload::MarkReady { order_id: id },
        OrderStatus::Dispatched => {
            let delivery_id = req.delivery_id.ok_or_else(|| {
                ApiError::validation("delivery_id is required to dispatch an order")
            })?;
            OrderCommandPayload::DispatchOrder {
                order_id: id,
                delivery_id,
            }
        }
        OrderStatus::Delivered => OrderCommandPayload::MarkDelivered { order_id: id },
        OrderStatus::Rejected => OrderCommandPayload::RejectOrder { order_id: id },
        OrderStatus::Pending | OrderStatus::Confirmed => {
            return Err(ApiError::invalid(
                "orders cannot be moved back to pending/confirmed",
            ));
        }
    };

    let actor_name = req.user_name.unwrap_or_else(|| req.user_id.clone());
    let cmd = OrderCommand::new(req.user_id, actor_name, payload);
    run_command(&state, cmd).await
}

#[derive(Debug, Deserialize, Validate)]
struct ActorRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    user_id: String,
    user_name: Option<String>,
}

async fn authorize_transfer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let actor_name = req.user_name.unwrap_or_else(|| req.user_id.clone());
    let cmd = OrderCommand::new(
        req.user_id,
        actor_name,
        OrderCommandPayload::AuthorizeTransfer { order_id: id },
    );
    run_command(&state, cmd).await
}

async fn approve_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ActorRequest>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let actor_name = req.user_name.unwrap_or_else(|| req.user_id.clone());
    let cmd = OrderCommand::new(
        req.user_id,
        actor_name,
        OrderCommandPayload::ApproveOrder { order_id: id },
    );
    run_command(&state, cmd).await
}

async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .orders
        .delete_order(&id)
        .await
        .map_err(manager_to_api)?;
    Ok(Json(ApiResponse::ok(())))
}

#[derive(Debug, Deserialize, Validate)]
struct ResetRequest {
    #[validate(length(min = 1, message = "select at least one branch"))]
    branch_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    removed: u64,
}

/// Admin reset: purge all orders of the selected branches
async fn reset_orders(
    State(state): State<ServerState>,
    Json(req): Json<ResetRequest>,
) -> ApiResult<Json<ApiResponse<ResetResponse>>> {
    req.validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let removed = state
        .orders
        .delete_orders_by_branches(&req.branch_ids)
        .await
        .map_err(manager_to_api)?;
    Ok(Json(ApiResponse::ok(ResetResponse { removed })))
}

async fn dispatch_candidates(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<DispatchCandidate>>>> {
    let candidates = state
        .orders
        .dispatch_candidates(&id)
        .await
        .map_err(manager_to_api)?;
    Ok(Json(ApiResponse::ok(candidates)))
}

#[derive(Debug, Serialize)]
struct WhatsAppLinkResponse {
    link: String,
}

/// Customer-notification deep link with the order summary, in the
/// message format branch staff already use.
async fn whatsapp_link_for_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<WhatsAppLinkResponse>>> {
    let order = state.orders.get_order(&id).await.map_err(manager_to_api)?;
    let phone = order
        .customer_phone
        .as_deref()
        .ok_or_else(|| ApiError::validation("order has no customer phone"))?;

    let branch_name = state
        .store
        .get_branches()
        .await
        .ok()
        .and_then(|branches| {
            branches
                .into_iter()
                .find(|b| b.id == order.branch_id)
                .map(|b| b.name)
        })
        .unwrap_or_else(|| "nuestra sucursal".to_string());

    let items: Vec<String> = order
        .items
        .iter()
        .map(|i| {
            format!(
                "{}x {} - L. {:.2}",
                i.quantity,
                i.product_name,
                i.price * i.quantity as f64
            )
        })
        .collect();
    let message = format!(
        "Hola 👋 le saludamos de {}. Tu pedido {}:\n\n{}\n\nTotal: L. {:.2}\n\nestá siendo procesado 😊 GRACIAS POR SU PREFERENCIA.",
        branch_name,
        order.order_number,
        items.join("\n"),
        order.total
    );

    let link = whatsapp_link(phone, Some(&message))
        .ok_or_else(|| ApiError::validation("order has no usable customer phone"))?;
    Ok(Json(ApiResponse::ok(WhatsAppLinkResponse { link })))
}

/// Execute a command and translate the response to the HTTP envelope
async fn run_command(
    state: &ServerState,
    cmd: OrderCommand,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let response = state.orders.execute_command(cmd).await;
    match (response.success, response.order, response.error) {
        (true, Some(order), _) => Ok(Json(
            ApiResponse::ok(order).with_trace_id(response.command_id),
        )),
        (true, None, _) => Err(ApiError::internal("command succeeded without an order")),
        (_, _, Some(err)) => Err(command_to_api(err)),
        (_, _, None) => Err(ApiError::internal("command failed without error detail")),
    }
}

fn command_to_api(err: CommandError) -> ApiError {
    match err.code {
        CommandErrorCode::OrderNotFound => ApiError::not_found("Order"),
        CommandErrorCode::AgentNotFound => ApiError::not_found("Delivery agent"),
        CommandErrorCode::ValidationFailed => ApiError::validation(err.message),
        CommandErrorCode::InvalidTransition | CommandErrorCode::UnauthorizedTransition => {
            ApiError::transition(err.message)
        }
        CommandErrorCode::StoreUnavailable => ApiError::store(err.message),
        CommandErrorCode::InternalError => ApiError::internal(err.message),
    }
}

fn manager_to_api(err: ManagerError) -> ApiError {
    command_to_api(err.into())
}
