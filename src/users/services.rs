use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::users::{
    error::UserError,
    repo::UserStore,
    repo_types::{NewUser, User},
};

/// Trims the address and lowercases its domain part. The local part is kept
/// as given since mailbox names may be case sensitive.
pub fn normalize_email(raw: &str) -> String {
    let email = raw.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[instrument(skip(store, password))]
pub async fn create_user(
    store: &dyn UserStore,
    email: &str,
    name: &str,
    password: &str,
) -> Result<User, UserError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(UserError::EmptyEmail);
    }

    let password_hash = hash_password(password)?;
    let user = store
        .insert(NewUser {
            id: Uuid::new_v4(),
            email,
            name: name.to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user)
}

/// Returns `Ok(None)` when no user has this email.
pub async fn find_user_by_email(
    store: &dyn UserStore,
    email: &str,
) -> anyhow::Result<Option<User>> {
    store.find_by_email(&normalize_email(email)).await
}
