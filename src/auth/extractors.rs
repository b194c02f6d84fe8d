use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tower_sessions::Session;
use tracing::{error, warn};

use super::{backend::CheckPasswordBackend, handlers::internal, session::current_user_id};
use crate::{state::AppState, users::repo_types::User};

/// Resolves the session cookie to an active user.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, msg)| (status, msg.to_string()))?;

        let user_id = current_user_id(&session)
            .await
            .map_err(|e| {
                error!(error = %e, "session read failed");
                internal()
            })?
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))?;

        let backend = CheckPasswordBackend::from_ref(state);
        let user = backend
            .get_user(user_id)
            .await
            .map_err(|e| {
                error!(error = %e, %user_id, "get_user failed");
                internal()
            })?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                warn!(%user_id, "session user missing or inactive");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            })?;

        Ok(CurrentUser(user))
    }
}
