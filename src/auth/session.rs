//! Server-side sessions keyed by the `sessionid` cookie.

use tokio::task::JoinHandle;
use tower_sessions::{
    cookie::{time::Duration, SameSite},
    session_store::ExpiredDeletion,
    Expiry, Session, SessionManagerLayer, SessionStore,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::users::repo_types::User;

pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Session key holding the authenticated user's id.
const AUTH_USER_ID: &str = "_auth_user_id";

pub fn session_layer<S>(store: S, config: &SessionConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.ttl_minutes)))
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Binds `user` to the session. The id is rotated first so a session id
/// issued before authentication is never reused after it.
pub async fn login(session: &Session, user: &User) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(AUTH_USER_ID, user.id).await
}

pub async fn logout(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

pub async fn current_user_id(
    session: &Session,
) -> Result<Option<Uuid>, tower_sessions::session::Error> {
    session.get::<Uuid>(AUTH_USER_ID).await
}

/// Removes expired session records every `period`. A failed sweep is logged
/// and retried on the next tick.
pub fn spawn_expired_deletion<S>(store: S, period: std::time::Duration) -> JoinHandle<()>
where
    S: ExpiredDeletion + Clone,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match store.delete_expired().await {
                Ok(()) => debug!("expired sessions deleted"),
                Err(e) => warn!(error = %e, "expired session sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use tower_sessions::{
        session::{Id, Record},
        session_store, MemoryStore,
    };

    use super::*;
    use crate::config::MAX_SESSION_TTL_MINUTES;

    #[derive(Debug, Clone, Default)]
    struct CountingStore {
        inner: MemoryStore,
        sweeps: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SessionStore for CountingStore {
        async fn save(&self, record: &Record) -> session_store::Result<()> {
            self.inner.save(record).await
        }

        async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
            self.inner.load(id).await
        }

        async fn delete(&self, id: &Id) -> session_store::Result<()> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl ExpiredDeletion for CountingStore {
        async fn delete_expired(&self) -> session_store::Result<()> {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn layer_accepts_longest_configured_ttl() {
        let config = SessionConfig {
            cookie_secure: true,
            ttl_minutes: MAX_SESSION_TTL_MINUTES,
        };
        let _layer = session_layer(MemoryStore::default(), &config);
    }

    #[tokio::test]
    async fn expired_sessions_are_swept_periodically() {
        let store = CountingStore::default();
        let sweeps = store.sweeps.clone();

        let task = spawn_expired_deletion(store, std::time::Duration::from_millis(10));
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        task.abort();

        assert!(sweeps.load(Ordering::SeqCst) >= 2);
    }
}
