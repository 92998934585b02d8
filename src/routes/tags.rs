use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::TagsResponse;
use crate::events::EventPublisher;
use crate::forms::tags::{TagForm, TagListParams};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, tags as tag_service};

#[get("/tags")]
pub async fn list_tags(
    params: web::Query<TagListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = tag_service::list_tags(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(TagsResponse::from(page)))
}

#[get("/tags/list")]
pub async fn list_all_tags(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tags = tag_service::list_all_tags(repo.get_ref(), &user, false)?;
    Ok(HttpResponse::Ok().json(tags))
}

#[get("/tag/kanban")]
pub async fn list_kanban_tags(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tags = tag_service::list_all_tags(repo.get_ref(), &user, true)?;
    Ok(HttpResponse::Ok().json(tags))
}

#[get("/tags/{id}")]
pub async fn show_tag(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tag = tag_service::show_tag(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(tag))
}

#[post("/tags")]
pub async fn create_tag(
    form: web::Json<TagForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let tag = tag_service::create_tag(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(tag))
}

#[put("/tags/{id}")]
pub async fn update_tag(
    id: web::Path<i32>,
    form: web::Json<TagForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let tag = tag_service::update_tag(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(tag))
}

#[delete("/tags/{id}")]
pub async fn delete_tag(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    tag_service::delete_tag(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Tag deleted",
    }))
}
