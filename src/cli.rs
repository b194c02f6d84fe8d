use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use regex::Regex;

use crate::{state::AppState, users::services::create_user};

#[derive(Parser)]
#[command(name = "rbac")]
#[command(author, version, about = "Email/password login service with server-side sessions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run migrations and serve HTTP (default)
    Serve,
    /// Create a user that can log in
    CreateUser {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Plaintext password, hashed before storage
        #[arg(short, long)]
        password: String,
    },
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub async fn run_create_user(
    state: &AppState,
    email: &str,
    name: &str,
    password: &str,
) -> anyhow::Result<()> {
    let email = email.trim();
    if !is_valid_email(email) {
        anyhow::bail!("invalid email address: {email:?}");
    }
    let user = create_user(state.users.as_ref(), email, name, password).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "created user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::services::find_user_by_email;

    #[test]
    fn email_format() {
        assert!(is_valid_email("jane@example.org"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane example@org.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn parses_create_user() {
        let cli = Cli::try_parse_from([
            "rbac", "create-user", "-e", "jane@example.org", "-n", "Jane Doe", "-p", "pw",
        ])
        .unwrap();
        match cli.command {
            Some(Command::CreateUser { email, name, password }) => {
                assert_eq!(email, "jane@example.org");
                assert_eq!(name, "Jane Doe");
                assert_eq!(password, "pw");
            }
            _ => panic!("expected create-user"),
        }
    }

    #[test]
    fn serve_is_default() {
        let cli = Cli::try_parse_from(["rbac"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn create_user_command_persists_user() {
        let state = AppState::fake();
        run_create_user(&state, " jane@example.org ", "Jane Doe", "pw").await.unwrap();
        let found = find_user_by_email(state.users.as_ref(), "jane@example.org")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn create_user_command_rejects_bad_email() {
        let state = AppState::fake();
        let err = run_create_user(&state, "not-an-email", "X", "pw").await.unwrap_err();
        assert!(err.to_string().contains("invalid email"));
    }
}
