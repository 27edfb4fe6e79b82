//! Customer persistence model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::DeliveryAddress;

/// Customer profile
///
/// The delivery address here is the live profile value; orders copy it at
/// creation time and keep their own snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning user account
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub delivery_address: DeliveryAddress,
    #[serde(default)]
    pub phone: Option<String>,
}
