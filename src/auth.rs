//! Bearer-token authentication and password hashing.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{CompanyId, PlainPassword, Profile, TypeConstraintError, UserId};
use crate::domain::user::User;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hash error: {0}")]
    PasswordHash(String),
}

/// Claims carried by the bearer token and extracted on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub company_id: i32,
    pub profile: Profile,
    pub super_user: bool,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User, ttl_hours: i64) -> Self {
        let expires = chrono::Utc::now() + chrono::Duration::hours(ttl_hours);
        Self {
            sub: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.to_string(),
            company_id: user.company_id.get(),
            profile: user.profile,
            super_user: user.super_user,
            exp: expires.timestamp().max(0) as usize,
        }
    }

    pub fn user_id(&self) -> Result<UserId, TypeConstraintError> {
        let id = self
            .sub
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::InvalidValue(self.sub.clone()))?;
        UserId::new(id)
    }

    pub fn company_id(&self) -> Result<CompanyId, TypeConstraintError> {
        CompanyId::new(self.company_id)
    }

    pub fn is_admin(&self) -> bool {
        self.profile == Profile::Admin
    }
}

pub fn issue_token(claims: &AuthenticatedUser, secret: &str) -> Result<String, AuthError> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let data = decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

pub fn hash_password(password: &PlainPassword) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Returns `false` for malformed hashes as well as mismatches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            log::warn!("Stored password hash is malformed: {err}");
            false
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ServiceError::Internal("server configuration is not registered".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ServiceError::Unauthenticated)?;

    decode_token(token, &config.secret).map_err(|err| {
        log::debug!("Rejected bearer token: {err}");
        ServiceError::Unauthenticated
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
