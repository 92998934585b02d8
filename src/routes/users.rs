use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::UsersResponse;
use crate::dto::users::ProfileImageResponse;
use crate::events::EventPublisher;
use crate::forms::users::{ProfileImageForm, TicketsWidthForm, UserForm, UserListParams};
use crate::models::config::ServerConfig;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, users as user_service};

#[get("/users")]
pub async fn list_users(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = user_service::list_users(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(UsersResponse::from(page)))
}

/// Unpaginated list used by pickers.
#[get("/users/list")]
pub async fn list_simple(
    params: web::Query<UserListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let users = user_service::list_simple(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/users/{id}")]
pub async fn show_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let record = user_service::show_user(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(record))
}

#[post("/users")]
pub async fn create_user(
    form: web::Json<UserForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let record = user_service::create_user(
        repo.get_ref(),
        events.get_ref(),
        server_config.get_ref(),
        &user,
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[put("/users/{id}")]
pub async fn update_user(
    id: web::Path<i32>,
    form: web::Json<UserForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let record = user_service::update_user(
        repo.get_ref(),
        events.get_ref(),
        server_config.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    user_service::delete_user(
        repo.get_ref(),
        events.get_ref(),
        server_config.get_ref(),
        &user,
        id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted",
    }))
}

#[post("/users/{id}/media-upload")]
pub async fn upload_profile_image(
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<ProfileImageForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let dir = Path::new(&server_config.public_dir);
    let stamp = Utc::now().timestamp_millis();

    let record = user_service::upload_profile_image(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        || form.save(dir, stamp).map_err(ServiceError::from),
    )?;
    Ok(HttpResponse::Ok().json(ProfileImageResponse::from(record)))
}

#[put("/users/toggleChangeWidht/{id}")]
pub async fn update_tickets_width(
    id: web::Path<i32>,
    form: web::Json<TicketsWidthForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let record = user_service::update_tickets_width(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(record))
}
