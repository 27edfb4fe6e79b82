//! Customer wire types

use serde::{Deserialize, Serialize};

/// Postal delivery address
///
/// Snapshotted onto every order at creation time; later profile edits do not
/// touch placed orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryAddress {
    pub street: String,
    pub house_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staircase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door: Option<String>,
    pub postal_code: String,
    pub city: String,
}

