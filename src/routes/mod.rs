//! HTTP handlers and the mapping of service errors onto responses.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;

use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

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

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated | ServiceError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Unauthorized
            | ServiceError::Forbidden(_)
            | ServiceError::UserCreationDisabled => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Form(_)
            | ServiceError::TypeConstraint(_)
            | ServiceError::EmailRequired
            | ServiceError::MissingResetInfo
            | ServiceError::PasswordsDoNotMatch
            | ServiceError::InvalidResetToken => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::EmailSending | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Repository(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Duplicate(_) => StatusCode::CONFLICT,
                RepositoryError::ValidationError(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.code() }))
    }
}

/// Malformed JSON bodies answer with the usual `{"error": ...}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::debug!("Rejected JSON body: {err}");
        ServiceError::Form(format!("ERR_INVALID_BODY: {err}")).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        ServiceError::Form(format!("ERR_INVALID_QUERY: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn errors_render_code_and_status() {
        let response = ServiceError::NotFound("ERR_NO_USER_FOUND").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), br#"{"error":"ERR_NO_USER_FOUND"}"#);
    }

    #[test]
    fn repository_errors_keep_their_meaning() {
        assert_eq!(
            ServiceError::Repository(RepositoryError::Duplicate("x".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Repository(RepositoryError::DatabaseError("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ServiceError::EmailSending.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ServiceError::UserCreationDisabled.status_code(), StatusCode::FORBIDDEN);
    }
}
