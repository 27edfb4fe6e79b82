//! Restaurant repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Restaurant;
use shared::models::DayHours;

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find restaurant by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid restaurant ID: {}", id)))?;
        let restaurant: Option<Restaurant> = self.base.db().select(thing).await?;
        Ok(restaurant)
    }

    /// All restaurants owned by a user account
    pub async fn find_by_owner(&self, owner: &RecordId) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE owner = $owner ORDER BY name")
            .bind(("owner", owner.clone()))
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// All active restaurants (customer browse path)
    pub async fn find_all_active(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    /// Create a restaurant
    pub async fn create(
        &self,
        owner: RecordId,
        name: String,
        opening_hours: Vec<DayHours>,
        address: String,
        city: String,
        phone: Option<String>,
    ) -> RepoResult<Restaurant> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE restaurant SET
                    owner = $owner,
                    name = $name,
                    opening_hours = $opening_hours,
                    address = $address,
                    city = $city,
                    phone = $phone,
                    is_active = true
                RETURN AFTER",
            )
            .bind(("owner", owner))
            .bind(("name", name))
            .bind(("opening_hours", opening_hours))
            .bind(("address", address))
            .bind(("city", city))
            .bind(("phone", phone))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        restaurants
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }
}
