//! Database Models

// Serde helpers
pub mod serde_helpers;

// Offers
pub mod offer;
pub mod offer_usage;

// Orders
pub mod order;

// Menu
pub mod food_item;

// Re-exports
pub use food_item::{FoodItem, FoodItemCreate};
pub use offer::{DiscountType, Offer, OfferCreate};
pub use offer_usage::OfferUsage;
pub use order::{Order, OrderCreate, OrderItem, OrderStatus, PaymentInfo};
