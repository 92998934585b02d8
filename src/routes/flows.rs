use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::FlowsResponse;
use crate::events::EventPublisher;
use crate::forms::flows::{CreateFlowForm, DuplicateFlowForm, SaveFlowForm, UpdateFlowForm};
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, flows as flow_service};

#[get("/flowbuilder")]
pub async fn list_flows(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = flow_service::list_flows(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(FlowsResponse::from(page)))
}

#[post("/flowbuilder")]
pub async fn create_flow(
    form: web::Json<CreateFlowForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let flow =
        flow_service::create_flow(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(flow))
}

#[put("/flowbuilder")]
pub async fn update_flow(
    form: web::Json<UpdateFlowForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let flow =
        flow_service::update_flow(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(flow))
}

#[post("/flowbuilder/duplicate")]
pub async fn duplicate_flow(
    form: web::Json<DuplicateFlowForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let flow =
        flow_service::duplicate_flow(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(flow))
}

#[post("/flowbuilder/flow")]
pub async fn save_flow_graph(
    form: web::Json<SaveFlowForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let flow =
        flow_service::save_flow_graph(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(flow))
}

#[get("/flowbuilder/{id}")]
pub async fn show_flow(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let flow = flow_service::show_flow(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(flow))
}

#[delete("/flowbuilder/{id}")]
pub async fn delete_flow(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    flow_service::delete_flow(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Flow deleted",
    }))
}
