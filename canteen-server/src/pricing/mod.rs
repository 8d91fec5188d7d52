//! Discount Engine Module
//!
//! This module handles discount calculation for offers.
//! Discounts are computed on the backend when a coupon is applied.

mod calculator;

pub use calculator::*;
