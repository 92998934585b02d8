use actix_web::{HttpResponse, delete, get, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::CompaniesResponse;
use crate::forms::companies::CompanyForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, companies as company_service};

#[get("/companies")]
pub async fn list_companies(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = company_service::list_companies(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(CompaniesResponse::from(page)))
}

#[get("/companies/{id}")]
pub async fn show_company(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let company = company_service::show_company(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(company))
}

#[put("/companies/{id}")]
pub async fn update_company(
    id: web::Path<i32>,
    form: web::Json<CompanyForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let company =
        company_service::update_company(repo.get_ref(), &user, id.into_inner(), form.into_inner())?;
    Ok(HttpResponse::Ok().json(company))
}

#[delete("/companies/{id}")]
pub async fn delete_company(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    company_service::delete_company(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Company deleted",
    }))
}
