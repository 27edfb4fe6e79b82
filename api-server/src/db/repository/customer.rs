//! Customer profile repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Customer;
use shared::models::DeliveryAddress;

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find customer profile by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = self.base.db().select(id.clone()).await?;
        Ok(customer)
    }

    /// Find the customer profile owned by a user account
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a customer profile
    pub async fn create(
        &self,
        user: RecordId,
        delivery_address: DeliveryAddress,
        phone: Option<String>,
    ) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query(
                "CREATE customer SET
                    user = $user,
                    delivery_address = $delivery_address,
                    phone = $phone
                RETURN AFTER",
            )
            .bind(("user", user))
            .bind(("delivery_address", delivery_address))
            .bind(("phone", phone))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        customers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create customer profile".to_string()))
    }

    /// Replace the live delivery address on a profile
    ///
    /// Orders keep their own snapshot; this never touches placed orders.
    pub async fn update_address(
        &self,
        id: &RecordId,
        delivery_address: DeliveryAddress,
    ) -> RepoResult<Customer> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET delivery_address = $delivery_address RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("delivery_address", delivery_address))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        customers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}
