//! Food Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{FoodItem, FoodItemCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "food_item";

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All menu entries, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<FoodItem>> {
        let items: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Menu entries in a category, newest first
    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<FoodItem>> {
        let category_owned = category.to_string();
        let items: Vec<FoodItem> = self
            .base
            .db()
            .query("SELECT * FROM food_item WHERE category = $category ORDER BY createdAt DESC")
            .bind(("category", category_owned))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find entry by id ("food_item:xxx" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let item: Option<FoodItem> = self.base.db().select(record_key(TABLE, id)).await?;
        Ok(item)
    }

    /// Create a menu entry
    pub async fn create(&self, data: FoodItemCreate, created_at: i64) -> RepoResult<FoodItem> {
        let item = FoodItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image,
            is_popular: data.is_popular,
            is_healthy: data.is_healthy,
            calories: data.calories,
            protein: data.protein,
            carbs: data.carbs,
            fats: data.fats,
            rating: data.rating,
            available: data.available,
            created_at,
        };

        let created: Option<FoodItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food item".to_string()))
    }
}
