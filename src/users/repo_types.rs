use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String, // login handle, unique
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

/// Fields supplied when persisting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
