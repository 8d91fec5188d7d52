//! Discount Calculator
//!
//! Logic for computing the discount an offer grants on a cart.
//! Uses rust_decimal for the percentage path, stores as i64 paise.

use crate::db::models::DiscountType;
use rust_decimal::prelude::*;

/// Convert paise to Decimal for calculation
#[inline]
fn to_decimal(value: i64) -> Decimal {
    Decimal::from_i64(value).unwrap_or_default()
}

/// Convert Decimal back to whole paise, half-up
#[inline]
fn to_paise(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Computed discount result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    /// Amount taken off the cart, in paise
    pub discount_amount: i64,
    /// Cart value after the discount, in paise
    pub new_total: i64,
}

/// Compute the discount an offer grants on `cart_value`
///
/// Percentage offers take `discount_value` percent of the cart; flat
/// offers take `discount_value` paise. The discount is clamped to the
/// cart value, so `new_total` never goes negative.
pub fn compute_discount(
    cart_value: i64,
    discount_type: &DiscountType,
    discount_value: i64,
) -> Discount {
    let raw = match discount_type {
        DiscountType::Percentage => {
            to_paise(to_decimal(cart_value) * to_decimal(discount_value) / Decimal::ONE_HUNDRED)
        }
        DiscountType::Flat => discount_value,
    };

    let discount_amount = raw.clamp(0, cart_value);
    Discount {
        discount_amount,
        new_total: cart_value - discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_discount() {
        // 20% off 200 leaves 160
        let d = compute_discount(200, &DiscountType::Percentage, 20);
        assert_eq!(d.discount_amount, 40);
        assert_eq!(d.new_total, 160);
    }

    #[test]
    fn test_flat_discount() {
        let d = compute_discount(500, &DiscountType::Flat, 50);
        assert_eq!(d.discount_amount, 50);
        assert_eq!(d.new_total, 450);
    }

    #[test]
    fn test_flat_discount_clamped_to_cart() {
        // Flat 500 on a 300 cart takes the whole cart, never below zero
        let d = compute_discount(300, &DiscountType::Flat, 500);
        assert_eq!(d.discount_amount, 300);
        assert_eq!(d.new_total, 0);
    }

    #[test]
    fn test_full_percentage_discount() {
        let d = compute_discount(250, &DiscountType::Percentage, 100);
        assert_eq!(d.discount_amount, 250);
        assert_eq!(d.new_total, 0);
    }

    #[test]
    fn test_zero_cart() {
        let d = compute_discount(0, &DiscountType::Percentage, 20);
        assert_eq!(d.discount_amount, 0);
        assert_eq!(d.new_total, 0);

        let d = compute_discount(0, &DiscountType::Flat, 50);
        assert_eq!(d.discount_amount, 0);
        assert_eq!(d.new_total, 0);
    }

    // ========== Precision tests ==========

    #[test]
    fn test_percentage_rounds_half_up() {
        // 15% of 150 = 22.5, rounds to 23
        let d = compute_discount(150, &DiscountType::Percentage, 15);
        assert_eq!(d.discount_amount, 23);
        assert_eq!(d.new_total, 127);
    }

    #[test]
    fn test_percentage_rounds_down_below_midpoint() {
        // 33% of 100 = 33 exactly; 33% of 10 = 3.3, rounds to 3
        let d = compute_discount(100, &DiscountType::Percentage, 33);
        assert_eq!(d.discount_amount, 33);

        let d = compute_discount(10, &DiscountType::Percentage, 33);
        assert_eq!(d.discount_amount, 3);
        assert_eq!(d.new_total, 7);
    }

    #[test]
    fn test_large_cart_no_overflow() {
        // 10 crore rupees in paise stays exact through the Decimal path
        let cart = 1_000_000_000_i64;
        let d = compute_discount(cart, &DiscountType::Percentage, 20);
        assert_eq!(d.discount_amount, 200_000_000);
        assert_eq!(d.new_total, 800_000_000);
    }
}
