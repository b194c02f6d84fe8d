use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Applies the `users` schema and the session table.
pub async fn migrate(db: &PgPool) -> anyhow::Result<PostgresStore> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;

    let sessions = PostgresStore::new(db.clone());
    sessions.migrate().await.context("migrate session store")?;
    tracing::debug!("migrations applied");
    Ok(sessions)
}
