//! Restaurant and dish wire types

use serde::{Deserialize, Serialize};

/// Opening hours for one weekday
///
/// `open`/`close` are "HH:MM" strings; both absent means closed that day.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DayHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

impl DayHours {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn open_between(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: Some(open.into()),
            close: Some(close.into()),
        }
    }
}

/// Create restaurant payload (restaurant owners)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    /// Exactly 7 entries, Monday first
    pub opening_hours: Vec<DayHours>,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
}

/// Create dish payload (restaurant owners)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDishRequest {
    pub name: String,
    pub price: f64,
    pub cooking_time_minutes: i32,
    #[serde(default)]
    pub description: Option<String>,
}
