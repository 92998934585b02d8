//! Bodies returned by the authentication endpoints.

use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::user::User;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub company: Company,
    pub user: User,
}

/// Plain acknowledgement, e.g. after a recovery email is requested.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub count: usize,
}
