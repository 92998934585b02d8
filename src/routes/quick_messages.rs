use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::QuickMessagesResponse;
use crate::events::EventPublisher;
use crate::forms::quick_messages::QuickMessageForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, quick_messages as quick_message_service};

#[get("/quick-messages")]
pub async fn list_quick_messages(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = quick_message_service::list_quick_messages(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(QuickMessagesResponse::from(page)))
}

#[get("/quick-messages/{id}")]
pub async fn show_quick_message(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let record =
        quick_message_service::show_quick_message(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(record))
}

#[post("/quick-messages")]
pub async fn create_quick_message(
    form: web::Json<QuickMessageForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let record = quick_message_service::create_quick_message(
        repo.get_ref(),
        events.get_ref(),
        &user,
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[put("/quick-messages/{id}")]
pub async fn update_quick_message(
    id: web::Path<i32>,
    form: web::Json<QuickMessageForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let record = quick_message_service::update_quick_message(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(record))
}

#[delete("/quick-messages/{id}")]
pub async fn delete_quick_message(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    quick_message_service::delete_quick_message(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Quick message deleted",
    }))
}
