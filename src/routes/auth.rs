use actix_web::{HttpResponse, post, web};
use chrono::Utc;

use crate::dto::auth::{MessageResponse, SignupResponse};
use crate::forms::auth::{LoginForm, RecoverPasswordForm, ResetPasswordForm, SignupForm};
use crate::mail::{MailTemplates, Mailer};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, auth as auth_service};

#[post("/auth/signup")]
pub async fn signup(
    form: web::Json<SignupForm>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    templates: web::Data<MailTemplates>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let (company, user) = auth_service::signup(
        repo.get_ref(),
        mailer.get_ref(),
        templates.get_ref(),
        server_config.get_ref(),
        form.into_inner(),
        Utc::now().date_naive(),
    )?;
    Ok(HttpResponse::Ok().json(SignupResponse { company, user }))
}

#[post("/auth/login")]
pub async fn login(
    form: web::Json<LoginForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let response = auth_service::login(repo.get_ref(), server_config.get_ref(), form.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/auth/recover-password")]
pub async fn recover_password(
    form: web::Json<RecoverPasswordForm>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    templates: web::Data<MailTemplates>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    auth_service::recover_password(
        repo.get_ref(),
        mailer.get_ref(),
        templates.get_ref(),
        server_config.get_ref(),
        form.into_inner(),
        Utc::now().naive_utc(),
    )?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password recovery email sent",
    }))
}

#[post("/auth/reset-password")]
pub async fn reset_password(
    form: web::Json<ResetPasswordForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    auth_service::reset_password(repo.get_ref(), form.into_inner(), Utc::now().naive_utc())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password updated",
    }))
}
