use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::CampaignsResponse;
use crate::events::EventPublisher;
use crate::forms::campaigns::CampaignForm;
use crate::pagination::PageParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, campaigns as campaign_service};

#[get("/campaigns")]
pub async fn list_campaigns(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = campaign_service::list_campaigns(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(CampaignsResponse::from(page)))
}

#[get("/campaigns/{id}")]
pub async fn show_campaign(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaign_service::show_campaign(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(campaign))
}

#[post("/campaigns")]
pub async fn create_campaign(
    form: web::Json<CampaignForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaign_service::create_campaign(
        repo.get_ref(),
        events.get_ref(),
        &user,
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(campaign))
}

#[put("/campaigns/{id}")]
pub async fn update_campaign(
    id: web::Path<i32>,
    form: web::Json<CampaignForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaign_service::update_campaign(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(campaign))
}

#[delete("/campaigns/{id}")]
pub async fn delete_campaign(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    campaign_service::delete_campaign(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Campaign deleted",
    }))
}

#[post("/campaigns/{id}/cancel")]
pub async fn cancel_campaign(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let campaign =
        campaign_service::cancel_campaign(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(campaign))
}

#[post("/campaigns/{id}/restart")]
pub async fn restart_campaign(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let campaign = campaign_service::restart_campaign(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(campaign))
}
