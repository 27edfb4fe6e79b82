//! User account wire types

use super::customer::DeliveryAddress;
use serde::{Deserialize, Serialize};

/// Marketplace role, encoded in JWT claims
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    RestaurantOwner,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::RestaurantOwner => "restaurant_owner",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "restaurant_owner" => Ok(UserRole::RestaurantOwner),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
    /// Required for customer accounts (order address snapshot source)
    pub delivery_address: Option<DeliveryAddress>,
    pub phone: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub role: UserRole,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        let json = serde_json::to_string(&UserRole::RestaurantOwner).unwrap();
        assert_eq!(json, "\"restaurant_owner\"");
        let parsed: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, UserRole::RestaurantOwner);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("customer".parse::<UserRole>(), Ok(UserRole::Customer));
        assert!("admin".parse::<UserRole>().is_err());
    }
}
