//! Offer Repository
//!
//! Owns the offer table and its redemption ledger (offer_usage).
//! Timestamps come in from callers; this layer never reads the clock.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Offer, OfferCreate, OfferUsage};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const OFFER_TABLE: &str = "offer";

/// Single-transaction redemption.
///
/// The UPDATE matches only while the cap allows another use; when it
/// matches nothing the THROW aborts. A duplicate (offer, orderId) pair
/// fails the unique ledger index and rolls back the whole transaction,
/// increment included.
const RECORD_USAGE_QUERY: &str = r#"
BEGIN TRANSACTION;
LET $hit = (UPDATE offer SET uses += 1 WHERE code = $code AND (maxUses = 0 OR uses < maxUses) RETURN AFTER);
IF array::len($hit) = 0 { THROW "usage_limit_reached"; };
CREATE offer_usage CONTENT { offer: $hit[0].id, userId: $user_id, orderId: $order_id, usedAt: $used_at };
UPDATE offer SET active = false WHERE code = $code AND maxUses > 0 AND uses >= maxUses;
COMMIT TRANSACTION;
"#;

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all offers, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query("SELECT * FROM offer ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Find offer by code
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Offer>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM offer WHERE code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let offers: Vec<Offer> = result.take(0)?;
        Ok(offers.into_iter().next())
    }

    /// Find an active offer by code whose window covers `now`
    pub async fn find_active_by_code(&self, code: &str, now: i64) -> RepoResult<Option<Offer>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM offer \
                 WHERE code = $code AND active = true AND startDate <= $now AND endDate >= $now \
                 LIMIT 1",
            )
            .bind(("code", code_owned))
            .bind(("now", now))
            .await?;
        let offers: Vec<Offer> = result.take(0)?;
        Ok(offers.into_iter().next())
    }

    /// List active offers whose window covers `now`, newest first
    pub async fn find_active(&self, now: i64) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(
                "SELECT * FROM offer \
                 WHERE active = true AND startDate <= $now AND endDate >= $now \
                 ORDER BY createdAt DESC",
            )
            .bind(("now", now))
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Create a new offer with a zeroed usage counter
    pub async fn create(&self, data: OfferCreate, created_at: i64) -> RepoResult<Offer> {
        // Check duplicate code
        if self.find_by_code(&data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Offer code '{}' already exists",
                data.code
            )));
        }

        let code = data.code.clone();
        let offer = Offer {
            id: None,
            code: data.code,
            description: data.description,
            discount_type: data.discount_type,
            discount_value: data.discount_value,
            min_order_value: data.min_order_value,
            start_date: data.start_date,
            end_date: data.end_date,
            active: data.active,
            max_uses: data.max_uses,
            uses: 0,
            created_at,
        };

        let created: Option<Offer> = self
            .base
            .db()
            .create(OFFER_TABLE)
            .content(offer)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                // Unique index backstop for the precheck race
                if msg.contains("uniq_offer_code") {
                    RepoError::Duplicate(format!("Offer code '{}' already exists", code))
                } else {
                    RepoError::Database(msg)
                }
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Whether a ledger entry exists for this (offer, order) pair
    pub async fn has_usage(&self, offer_id: &RecordId, order_id: &str) -> RepoResult<bool> {
        let offer_owned = offer_id.clone();
        let order_owned = order_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM offer_usage WHERE offer = $offer AND orderId = $order_id LIMIT 1")
            .bind(("offer", offer_owned))
            .bind(("order_id", order_owned))
            .await?;
        let rows: Vec<OfferUsage> = result.take(0)?;
        Ok(!rows.is_empty())
    }

    /// Ledger entries for an offer, newest first
    pub async fn find_usages(&self, offer_id: &RecordId) -> RepoResult<Vec<OfferUsage>> {
        let offer_owned = offer_id.clone();
        let usages: Vec<OfferUsage> = self
            .base
            .db()
            .query("SELECT * FROM offer_usage WHERE offer = $offer ORDER BY usedAt DESC")
            .bind(("offer", offer_owned))
            .await?
            .take(0)?;
        Ok(usages)
    }

    /// Record a redemption for `code` if the cap allows it
    ///
    /// Returns Ok(true) when recorded, Ok(false) when the cap is already
    /// reached. A duplicate (offer, order) pair maps to Duplicate and
    /// leaves the counter untouched.
    pub async fn record_usage(
        &self,
        code: &str,
        user_id: &str,
        order_id: &str,
        used_at: i64,
    ) -> RepoResult<bool> {
        let response = self
            .base
            .db()
            .query(RECORD_USAGE_QUERY)
            .bind(("code", code.to_string()))
            .bind(("user_id", user_id.to_string()))
            .bind(("order_id", order_id.to_string()))
            .bind(("used_at", used_at))
            .await?;

        match response.check() {
            Ok(_) => Ok(true),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("usage_limit_reached") {
                    Ok(false)
                } else if msg.contains("uniq_offer_usage_order") {
                    Err(RepoError::Duplicate(format!(
                        "Offer usage already recorded for order {}",
                        order_id
                    )))
                } else {
                    Err(RepoError::Database(msg))
                }
            }
        }
    }
}
