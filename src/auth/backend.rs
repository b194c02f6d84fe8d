use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    auth::password::{burn_hash, verify_password},
    state::AppState,
    users::{repo::UserStore, repo_types::User, services::find_user_by_email},
};

/// Verifies an email/password pair against the user store and resolves
/// session user ids back to users.
#[derive(Clone)]
pub struct CheckPasswordBackend {
    users: Arc<dyn UserStore>,
}

impl FromRef<AppState> for CheckPasswordBackend {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone())
    }
}

impl CheckPasswordBackend {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// `Ok(None)` covers every credential failure: unknown email, wrong
    /// password and inactive account look the same to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        let Some(user) = find_user_by_email(self.users.as_ref(), email).await? else {
            burn_hash(password);
            debug!("authenticate: unknown email");
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "authenticate: password mismatch");
            return Ok(None);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "authenticate: inactive user");
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub async fn get_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        self.users.find_by_id(user_id).await
    }
}
