use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Public view of a user account. Never carries the password hash.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub is_admin: bool,
    pub is_banned: bool,

    /// Account-active flag
    pub status: bool,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            phone_number: u.phone_number,
            is_admin: u.is_admin,
            is_banned: u.is_banned,
            status: u.status,
            created_at: u.created_at,
        }
    }
}
