use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::{ImportResponse, MessageResponse};
use crate::dto::lists::ContactsResponse;
use crate::events::EventPublisher;
use crate::forms::contacts::{BlockContactForm, ContactForm, ImportContactsForm};
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, contacts as contact_service};

#[get("/contacts")]
pub async fn list_contacts(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = contact_service::list_contacts(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(ContactsResponse::from(page)))
}

#[post("/contacts/import")]
pub async fn import_contacts(
    MultipartForm(form): MultipartForm<ImportContactsForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let contacts = form.parse(user.company_id()?)?;
    let count = contact_service::import_contacts(repo.get_ref(), &user, &contacts)?;
    Ok(HttpResponse::Ok().json(ImportResponse { count }))
}

#[put("/contacts/block/{id}")]
pub async fn block_contact(
    id: web::Path<i32>,
    form: web::Json<BlockContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let contact = contact_service::block_contact(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(contact))
}

#[get("/contacts/{id}")]
pub async fn show_contact(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let contact = contact_service::show_contact(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(contact))
}

#[post("/contacts")]
pub async fn create_contact(
    form: web::Json<ContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let contact =
        contact_service::create_contact(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(contact))
}

#[put("/contacts/{id}")]
pub async fn update_contact(
    id: web::Path<i32>,
    form: web::Json<ContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let contact = contact_service::update_contact(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(contact))
}

#[delete("/contacts/{id}")]
pub async fn delete_contact(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    contact_service::delete_contact(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Contact deleted",
    }))
}
