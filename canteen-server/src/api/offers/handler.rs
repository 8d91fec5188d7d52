//! Offer API Handlers
//!
//! Coupon codes are normalized (trimmed, uppercased) before lookup, so
//! "save20" and "SAVE20" hit the same offer. Applying a coupon never
//! writes; recording usage is the only mutation and happens after
//! payment succeeds.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{DiscountType, Offer, OfferCreate};
use crate::db::repository::OfferRepository;
use crate::pricing::compute_discount;
use crate::utils::{AppError, AppResult, now_millis};

// ========== Wire types ==========

/// Create offer request
///
/// `discountType` arrives as a plain string so an unknown value maps to
/// a 400 instead of a deserialization reject.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub discount_type: String,
    #[validate(range(min = 1))]
    pub discount_value: i64,
    #[validate(range(min = 0))]
    pub min_order_value: Option<i64>,
    pub start_date: i64,
    pub end_date: i64,
    pub active: Option<bool>,
    #[validate(range(min = 0))]
    pub max_uses: Option<i64>,
}

/// Apply coupon request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOfferRequest {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(range(min = 0))]
    pub cart_value: i64,
    /// Caller identity, used for request tracing only
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Apply coupon response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOfferResponse {
    pub code: String,
    pub description: String,
    pub discount_amount: i64,
    pub new_total: i64,
}

/// Record usage request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsageRequest {
    #[validate(length(min = 1))]
    pub offer_code: String,
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub order_id: String,
}

/// Message-only response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ========== Handlers ==========

/// GET /api/offers - all offers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Offer>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offers = repo.find_all().await?;
    Ok(Json(offers))
}

/// GET /api/offers/active - offers currently redeemable
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<Offer>>> {
    let repo = OfferRepository::new(state.db.clone());
    let offers = repo.find_active(now_millis()).await?;
    Ok(Json(offers))
}

/// POST /api/offers - create an offer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOfferRequest>,
) -> AppResult<(StatusCode, Json<Offer>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let discount_type: DiscountType = payload.discount_type.parse().map_err(AppError::validation)?;

    if discount_type == DiscountType::Percentage && !(1..=100).contains(&payload.discount_value) {
        return Err(AppError::validation(
            "Percentage discount value must be between 1 and 100",
        ));
    }
    if payload.end_date < payload.start_date {
        return Err(AppError::validation("endDate must not precede startDate"));
    }

    let data = OfferCreate {
        code: payload.code.trim().to_uppercase(),
        description: payload.description,
        discount_type,
        discount_value: payload.discount_value,
        min_order_value: payload.min_order_value.unwrap_or(0),
        start_date: payload.start_date,
        end_date: payload.end_date,
        active: payload.active.unwrap_or(true),
        max_uses: payload.max_uses.unwrap_or(0),
    };

    let repo = OfferRepository::new(state.db.clone());
    let offer = repo.create(data, now_millis()).await?;

    tracing::info!("Offer created: {}", offer.code);
    Ok((StatusCode::CREATED, Json(offer)))
}

/// POST /api/offers/apply - price a coupon against a cart (no state change)
pub async fn apply(
    State(state): State<ServerState>,
    Json(payload): Json<ApplyOfferRequest>,
) -> AppResult<Json<ApplyOfferResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let code = payload.code.trim().to_uppercase();
    let repo = OfferRepository::new(state.db.clone());

    let offer = repo
        .find_active_by_code(&code, now_millis())
        .await?
        .ok_or_else(|| AppError::not_found("Invalid or expired offer code"))?;

    if offer.is_exhausted() {
        return Err(AppError::validation("Offer usage limit reached"));
    }
    if payload.cart_value < offer.min_order_value {
        return Err(AppError::validation(format!(
            "Minimum order value is ₹{}",
            offer.min_order_value
        )));
    }

    let discount = compute_discount(payload.cart_value, &offer.discount_type, offer.discount_value);

    tracing::info!(
        user = payload.user_id.as_deref().unwrap_or("anonymous"),
        code = %offer.code,
        "Offer applied: -{} on {}",
        discount.discount_amount,
        payload.cart_value
    );

    Ok(Json(ApplyOfferResponse {
        code: offer.code,
        description: offer.description,
        discount_amount: discount.discount_amount,
        new_total: discount.new_total,
    }))
}

/// POST /api/offers/usage - record a redemption after payment
pub async fn record_usage(
    State(state): State<ServerState>,
    Json(payload): Json<RecordUsageRequest>,
) -> AppResult<Json<MessageResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let code = payload.offer_code.trim().to_uppercase();
    let repo = OfferRepository::new(state.db.clone());

    let offer = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Offer not found"))?;

    if let Some(offer_id) = &offer.id {
        if repo.has_usage(offer_id, &payload.order_id).await? {
            return Err(AppError::conflict(
                "Offer usage already recorded for this order",
            ));
        }
    }

    let recorded = repo
        .record_usage(&code, &payload.user_id, &payload.order_id, now_millis())
        .await?;
    if !recorded {
        return Err(AppError::validation("Offer usage limit reached"));
    }

    tracing::info!(code = %code, order = %payload.order_id, "Offer usage recorded");
    Ok(Json(MessageResponse {
        message: "Offer usage recorded",
    }))
}
