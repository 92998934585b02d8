//! Business workflows invoked by the HTTP handlers.

use thiserror::Error;

use crate::auth::AuthenticatedUser;
use crate::domain::types::{CompanyId, UserId};
use crate::forms::FormError;
use crate::models::config::ServerConfig;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod campaigns;
pub mod companies;
pub mod contact_lists;
pub mod contacts;
pub mod flows;
pub mod quick_messages;
pub mod schedules;
pub mod settings;
pub mod tags;
pub mod tickets;
pub mod users;

/// Application error carrying a stable `ERR_*` code and an HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("ERR_SESSION_EXPIRED")]
    Unauthenticated,

    #[error("ERR_NO_PERMISSION")]
    Unauthorized,

    /// Operation refused for a reason given by the code.
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("ERR_USER_CREATION_DISABLED")]
    UserCreationDisabled,

    #[error("ERR_EMAIL_REQUIRED")]
    EmailRequired,

    #[error("ERR_MISSING_RESET_INFO")]
    MissingResetInfo,

    #[error("ERR_PASSWORDS_DO_NOT_MATCH")]
    PasswordsDoNotMatch,

    #[error("ERR_INVALID_RESET_TOKEN")]
    InvalidResetToken,

    #[error("ERR_INVALID_CREDENTIALS")]
    InvalidCredentials,

    #[error("ERR_SENDING_EMAIL")]
    EmailSending,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Returned in demo deployments for operations that would change accounts.
pub const ERR_DEMO_MODE: &str = "ERR_DEMO_MODE";

impl ServiceError {
    /// Code rendered in the `error` field of the response body.
    pub fn code(&self) -> String {
        match self {
            ServiceError::Internal(_) => "ERR_INTERNAL".to_string(),
            ServiceError::Repository(RepositoryError::NotFound) => "ERR_NOT_FOUND".to_string(),
            ServiceError::Repository(RepositoryError::Duplicate(_)) => {
                "ERR_DUPLICATED_RECORD".to_string()
            }
            ServiceError::Repository(RepositoryError::ValidationError(msg)) => msg.clone(),
            ServiceError::Repository(_) => "ERR_INTERNAL".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Logs a repository failure with context before it is propagated.
pub(crate) fn log_repo_error(context: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |err| {
        log::error!("{context}: {err}");
        ServiceError::from(err)
    }
}

pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_admin() || user.super_user {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub fn ensure_super(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.super_user {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Demo deployments refuse account changes.
pub fn ensure_not_demo(config: &ServerConfig) -> ServiceResult<()> {
    if config.demo {
        Err(ServiceError::Forbidden(ERR_DEMO_MODE))
    } else {
        Ok(())
    }
}

/// Company and user ids carried by the bearer token.
pub(crate) fn identity(user: &AuthenticatedUser) -> ServiceResult<(CompanyId, UserId)> {
    Ok((user.company_id()?, user.user_id()?))
}
