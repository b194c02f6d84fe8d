use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        backend::CheckPasswordBackend,
        dto::{LoginRequest, PublicUser},
        extractors::CurrentUser,
        session,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<&'static str, (StatusCode, String)> {
    let backend = CheckPasswordBackend::from_ref(&state);
    let user = match backend.authenticate(&payload.email, &payload.password).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!("login rejected");
            return Err((StatusCode::UNAUTHORIZED, "Unauthorized".into()));
        }
        Err(e) => {
            error!(error = %e, "authenticate failed");
            return Err(internal());
        }
    };

    if let Err(e) = session::login(&session, &user).await {
        error!(error = %e, user_id = %user.id, "session login failed");
        return Err(internal());
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok("OK")
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, (StatusCode, String)> {
    session::logout(&session).await.map_err(|e| {
        error!(error = %e, "session flush failed");
        internal()
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}

/// 500 rejection with a fixed body; the cause is only logged.
pub(crate) fn internal() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".into())
}
