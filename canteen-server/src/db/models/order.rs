//! Order Model
//!
//! Canteen orders with a forward-only status lifecycle. Monetary fields
//! are integer minor units (paise); timestamps are epoch milliseconds.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

/// Order lifecycle status
///
/// Statuses only move forward: pending -> preparing -> ready -> completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    /// Position in the lifecycle
    pub fn sequence(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Completed => 3,
        }
    }

    /// Whether moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        next.sequence() > self.sequence()
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Ready => write!(f, "ready"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub food_item_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// Unit price in paise at the time of ordering
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Payment details captured at order creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Payment method, e.g. "upi"
    #[validate(length(min = 1))]
    pub method: String,
    /// Gateway transaction reference, if any
    pub transaction_ref: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    /// Amount charged in paise, after any discount
    pub total_amount: i64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    /// Kitchen estimate (milliseconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_ready_time: Option<i64>,
    /// Created timestamp (milliseconds since epoch)
    #[serde(default)]
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItem>,
    /// Amount charged in paise, after any discount
    #[validate(range(min = 0))]
    pub total_amount: i64,
    pub payment: Option<PaymentInfo>,
}
