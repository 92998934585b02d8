use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::domain::types::ContactListId;
use crate::dto::auth::{ImportResponse, MessageResponse};
use crate::dto::lists::{ContactListItemsResponse, ContactListsResponse};
use crate::events::EventPublisher;
use crate::forms::contact_lists::{
    ContactListForm, ContactListItemForm, ContactListItemParams, ImportContactListForm,
};
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, contact_lists as contact_list_service};

#[get("/contact-lists")]
pub async fn list_contact_lists(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = contact_list_service::list_contact_lists(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(ContactListsResponse::from(page)))
}

#[get("/contact-lists/list")]
pub async fn list_all_contact_lists(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let lists = contact_list_service::all_contact_lists(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(lists))
}

#[post("/contact-lists/{id}/upload")]
pub async fn import_contact_list_items(
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<ImportContactListForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let list_id = ContactListId::new(id.into_inner())?;
    let items = form.parse(user.company_id()?, list_id)?;
    let count = contact_list_service::import_contact_list_items(
        repo.get_ref(),
        events.get_ref(),
        &user,
        list_id,
        &items,
    )?;
    Ok(HttpResponse::Ok().json(ImportResponse { count }))
}

#[get("/contact-lists/{id}")]
pub async fn show_contact_list(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let list = contact_list_service::show_contact_list(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(list))
}

#[post("/contact-lists")]
pub async fn create_contact_list(
    form: web::Json<ContactListForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let list = contact_list_service::create_contact_list(
        repo.get_ref(),
        events.get_ref(),
        &user,
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(list))
}

#[put("/contact-lists/{id}")]
pub async fn update_contact_list(
    id: web::Path<i32>,
    form: web::Json<ContactListForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let list = contact_list_service::update_contact_list(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(list))
}

#[delete("/contact-lists/{id}")]
pub async fn delete_contact_list(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    contact_list_service::delete_contact_list(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Contact list deleted",
    }))
}

#[get("/contact-list-items")]
pub async fn list_contact_list_items(
    params: web::Query<ContactListItemParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = contact_list_service::list_contact_list_items(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(ContactListItemsResponse::from(page)))
}

#[get("/contact-list-items/{id}")]
pub async fn show_contact_list_item(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let item =
        contact_list_service::show_contact_list_item(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

#[post("/contact-list-items")]
pub async fn create_contact_list_item(
    form: web::Json<ContactListItemForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let item = contact_list_service::create_contact_list_item(
        repo.get_ref(),
        events.get_ref(),
        &user,
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/contact-list-items/{id}")]
pub async fn update_contact_list_item(
    id: web::Path<i32>,
    form: web::Json<ContactListItemForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let item = contact_list_service::update_contact_list_item(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/contact-list-items/{id}")]
pub async fn delete_contact_list_item(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    contact_list_service::delete_contact_list_item(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Contact list item deleted",
    }))
}
