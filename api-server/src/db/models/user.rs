//! User account persistence model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use shared::models::UserRole;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unique login email
    pub email: String,
    /// Argon2id PHC-format hash
    pub password_hash: String,
    pub role: UserRole,
    pub display_name: String,
    pub created_at: String,
}
