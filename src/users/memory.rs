use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::{
    error::UserError,
    repo::UserStore,
    repo_types::{NewUser, User},
};

/// In-process user table with the same email uniqueness as the `users` schema.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn deactivate(&self, id: Uuid) {
        let mut rows = self.rows.write().expect("user table poisoned");
        if let Some(u) = rows.iter_mut().find(|u| u.id == id) {
            u.is_active = false;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut rows = self.rows.write().expect("user table poisoned");
        if rows.iter().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail);
        }
        let row = User {
            id: user.id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.read().expect("user table poisoned");
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let rows = self.rows.read().expect("user table poisoned");
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }
}
