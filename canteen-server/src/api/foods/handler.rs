//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{FoodItem, FoodItemCreate};
use crate::db::repository::FoodItemRepository;
use crate::utils::{AppError, AppResult, now_millis};

/// List foods query
#[derive(Debug, Deserialize)]
pub struct ListFoodsQuery {
    pub category: Option<String>,
}

/// GET /api/foods - menu entries, optionally filtered by category
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListFoodsQuery>,
) -> AppResult<Json<Vec<FoodItem>>> {
    let repo = FoodItemRepository::new(state.db.clone());
    let items = match query.category.as_deref() {
        Some(category) if !category.is_empty() => repo.find_by_category(category).await?,
        _ => repo.find_all().await?,
    };
    Ok(Json(items))
}

/// GET /api/foods/{id} - single menu entry
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FoodItem>> {
    let repo = FoodItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/foods - add a menu entry
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<(StatusCode, Json<FoodItem>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = FoodItemRepository::new(state.db.clone());
    let item = repo.create(payload, now_millis()).await?;

    tracing::info!("Food item created: {}", item.name);
    Ok((StatusCode::CREATED, Json(item)))
}
