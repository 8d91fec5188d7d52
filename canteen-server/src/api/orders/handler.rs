//! Order API Handlers
//!
//! Status changes are checked against the forward-only lifecycle before
//! they hit the database, then pushed to the owner's WebSocket
//! connections.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatus};
use crate::db::repository::OrderRepository;
use crate::notify::WsEvent;
use crate::utils::{AppError, AppResult, now_millis};

// ========== Wire types ==========

/// Create order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: &'static str,
    pub order: Order,
}

/// List orders query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub user_id: Option<String>,
}

/// Status update request
///
/// `status` arrives as a plain string so an unknown value maps to a 400
/// instead of a deserialization reject.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Kitchen estimate update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEtaRequest {
    /// Estimated ready time (milliseconds since epoch)
    pub estimated_ready_time: i64,
}

// ========== Handlers ==========

/// POST /api/orders/upi-order - create an order awaiting payment confirmation
pub async fn create_upi_order(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<CreateOrderResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload, now_millis()).await?;

    tracing::info!(user = %order.user_id, total = order.total_amount, "Order created");
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Order created successfully",
            order,
        }),
    ))
}

/// GET /api/orders?userId=x - orders for a user, newest first
pub async fn list_by_user(
    State(state): State<ServerState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let user_id = query
        .user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::validation("userId query parameter is required"))?;

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user_id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// PATCH /api/orders/{id}/status - move the order forward in its lifecycle
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let next: OrderStatus = payload.status.parse().map_err(AppError::validation)?;

    let repo = OrderRepository::new(state.db.clone());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if !current.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Cannot change status from {} to {}",
            current.status, next
        )));
    }

    let updated = repo.update_status(&id, next).await?;

    let delivered = state
        .notifier
        .notify(&updated.user_id, &WsEvent::OrderUpdate(&updated));
    tracing::info!(
        order = %id,
        status = %next,
        connections = delivered,
        "Order status updated"
    );

    Ok(Json(updated))
}

/// PATCH /api/orders/{id}/eta - set the kitchen estimate
pub async fn update_eta(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEtaRequest>,
) -> AppResult<Json<Order>> {
    if payload.estimated_ready_time <= 0 {
        return Err(AppError::validation("estimatedReadyTime must be positive"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let updated = repo.update_eta(&id, payload.estimated_ready_time).await?;

    let delivered = state
        .notifier
        .notify(&updated.user_id, &WsEvent::OrderUpdate(&updated));
    tracing::info!(order = %id, connections = delivered, "Order estimate updated");

    Ok(Json(updated))
}
