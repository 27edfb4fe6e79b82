//! Dish repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Dish;

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find dish by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Dish>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid dish ID: {}", id)))?;
        let dish: Option<Dish> = self.base.db().select(thing).await?;
        Ok(dish)
    }

    /// All available dishes on a restaurant's menu
    pub async fn find_by_restaurant(&self, restaurant: &RecordId) -> RepoResult<Vec<Dish>> {
        let dishes: Vec<Dish> = self
            .base
            .db()
            .query(
                "SELECT * FROM dish WHERE restaurant = $restaurant AND is_available = true ORDER BY name",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(dishes)
    }

    /// Create a dish
    pub async fn create(
        &self,
        restaurant: RecordId,
        name: String,
        price: f64,
        cooking_time_minutes: i32,
        description: Option<String>,
    ) -> RepoResult<Dish> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE dish SET
                    restaurant = $restaurant,
                    name = $name,
                    price = $price,
                    cooking_time_minutes = $cooking_time_minutes,
                    description = $description,
                    is_available = true
                RETURN AFTER",
            )
            .bind(("restaurant", restaurant))
            .bind(("name", name))
            .bind(("price", price))
            .bind(("cooking_time_minutes", cooking_time_minutes))
            .bind(("description", description))
            .await?;
        let dishes: Vec<Dish> = result.take(0)?;
        dishes
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }
}
