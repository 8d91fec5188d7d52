//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderCreate, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "food_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order in pending state
    pub async fn create(&self, data: OrderCreate, created_at: i64) -> RepoResult<Order> {
        let order = Order {
            id: None,
            user_id: data.user_id,
            items: data.items,
            total_amount: data.total_amount,
            status: OrderStatus::Pending,
            payment: data.payment,
            estimated_ready_time: None,
            created_at,
        };

        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id ("food_order:xxx" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_key(TABLE, id)).await?;
        Ok(order)
    }

    /// Orders for a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let user_owned = user_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM food_order WHERE userId = $user_id ORDER BY createdAt DESC")
            .bind(("user_id", user_owned))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Set order status, returning the updated record
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $rec SET status = $status RETURN AFTER")
            .bind(("rec", record_key(TABLE, id)))
            .bind(("status", status))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Set the kitchen estimate, returning the updated record
    pub async fn update_eta(&self, id: &str, eta: i64) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $rec SET estimatedReadyTime = $eta RETURN AFTER")
            .bind(("rec", record_key(TABLE, id)))
            .bind(("eta", eta))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
