use std::sync::Arc;

use clap::Parser;

mod app;
mod auth;
mod cli;
mod config;
mod db;
mod state;
mod users;

use crate::{
    cli::{Cli, Command},
    config::AppConfig,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "rbac=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config).await?;
    let sessions = db::migrate(&pool).await?;
    let state = AppState::init(config, pool);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let sweeper = auth::session::spawn_expired_deletion(
                sessions.clone(),
                std::time::Duration::from_secs(60),
            );
            let res = app::serve(app::build_app(state, sessions)).await;
            sweeper.abort();
            res
        }
        Command::CreateUser {
            email,
            name,
            password,
        } => cli::run_create_user(&state, &email, &name, &password).await,
    }
}
