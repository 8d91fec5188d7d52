//! Offer Model
//!
//! Discount offers redeemable at checkout. Monetary fields are integer
//! minor units (paise); timestamps are epoch milliseconds.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use surrealdb::RecordId;

/// How the discount value is applied to a cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Value is a percentage of the cart total (1-100)
    Percentage,
    /// Value is a fixed amount in paise
    Flat,
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "flat" => Ok(Self::Flat),
            other => Err(format!("Invalid discount type: {}", other)),
        }
    }
}

/// Offer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Coupon code, stored uppercase, unique
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    /// Minimum cart value in paise to qualify (0 = no minimum)
    #[serde(default)]
    pub min_order_value: i64,
    /// Validity window start (milliseconds since epoch)
    pub start_date: i64,
    /// Validity window end, inclusive (milliseconds since epoch)
    pub end_date: i64,
    pub active: bool,
    /// Redemption cap (0 = unlimited)
    #[serde(default)]
    pub max_uses: i64,
    /// Redemptions recorded so far
    #[serde(default)]
    pub uses: i64,
    /// Created timestamp (milliseconds since epoch)
    #[serde(default)]
    pub created_at: i64,
}

impl Offer {
    /// Whether the redemption cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.uses >= self.max_uses
    }

    /// Whether `now` falls inside the validity window
    pub fn is_within_window(&self, now: i64) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// Create offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCreate {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_value: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub active: bool,
    pub max_uses: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_offer(max_uses: i64, uses: i64) -> Offer {
        Offer {
            id: None,
            code: "SAVE20".to_string(),
            description: "20% off".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 20,
            min_order_value: 0,
            start_date: 1_000,
            end_date: 2_000,
            active: true,
            max_uses,
            uses,
            created_at: 500,
        }
    }

    #[test]
    fn test_discount_type_parse() {
        assert_eq!("percentage".parse(), Ok(DiscountType::Percentage));
        assert_eq!("flat".parse(), Ok(DiscountType::Flat));
        assert!("FLAT".parse::<DiscountType>().is_err());
        assert!("bogus".parse::<DiscountType>().is_err());
    }

    #[test]
    fn test_discount_type_wire_format() {
        let json = serde_json::to_string(&DiscountType::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
        let parsed: DiscountType = serde_json::from_str("\"flat\"").unwrap();
        assert_eq!(parsed, DiscountType::Flat);
    }

    #[test]
    fn test_is_exhausted() {
        assert!(!make_offer(0, 1_000_000).is_exhausted()); // unlimited
        assert!(!make_offer(5, 4).is_exhausted());
        assert!(make_offer(5, 5).is_exhausted());
        assert!(make_offer(5, 6).is_exhausted());
    }

    #[test]
    fn test_is_within_window() {
        let offer = make_offer(0, 0);
        assert!(!offer.is_within_window(999));
        assert!(offer.is_within_window(1_000)); // start inclusive
        assert!(offer.is_within_window(1_500));
        assert!(offer.is_within_window(2_000)); // end inclusive
        assert!(!offer.is_within_window(2_001));
    }

    #[test]
    fn test_offer_serializes_camel_case() {
        let offer = make_offer(5, 2);
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["discountType"], "percentage");
        assert_eq!(json["minOrderValue"], 0);
        assert_eq!(json["maxUses"], 5);
        assert!(json.get("id").is_none());
    }
}
