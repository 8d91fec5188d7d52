//! Food Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in paise
    pub price: i64,
    pub category: String,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<i64>,
    /// Grams per serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<i64>,
    /// Rating out of 5, in tenths (45 = 4.5)
    #[serde(default)]
    pub rating: i64,
    pub available: bool,
    /// Created timestamp (milliseconds since epoch)
    #[serde(default)]
    pub created_at: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    pub image: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_healthy: bool,
    #[validate(range(min = 0))]
    pub calories: Option<i64>,
    /// Grams per serving
    #[validate(range(min = 0))]
    pub protein: Option<i64>,
    #[validate(range(min = 0))]
    pub carbs: Option<i64>,
    #[validate(range(min = 0))]
    pub fats: Option<i64>,
    /// Rating out of 5, in tenths (45 = 4.5)
    #[serde(default = "default_rating")]
    #[validate(range(min = 0, max = 50))]
    pub rating: i64,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_rating() -> i64 {
    45
}

fn default_true() -> bool {
    true
}
