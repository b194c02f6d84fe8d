use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("users must have an email address")]
    EmptyEmail,
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
