//! Offer Usage Model
//!
//! Append-only redemption ledger. One row per (offer, order) pair,
//! enforced by a unique index.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Redemption ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferUsage {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Offer that was redeemed
    #[serde(with = "serde_helpers::record_id")]
    pub offer: RecordId,
    pub user_id: String,
    /// Order the redemption is tied to
    pub order_id: String,
    /// Redemption timestamp (milliseconds since epoch)
    pub used_at: i64,
}
