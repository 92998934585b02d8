use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::SchedulesResponse;
use crate::events::EventPublisher;
use crate::forms::schedules::{ScheduleForm, ScheduleListParams};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, schedules as schedule_service};

#[get("/schedules")]
pub async fn list_schedules(
    params: web::Query<ScheduleListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = schedule_service::list_schedules(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(SchedulesResponse::from(page)))
}

#[get("/schedules/{id}")]
pub async fn show_schedule(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let schedule = schedule_service::show_schedule(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(schedule))
}

#[post("/schedules")]
pub async fn create_schedule(
    form: web::Json<ScheduleForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let schedule = schedule_service::create_schedule(
        repo.get_ref(),
        events.get_ref(),
        &user,
        form.into_inner(),
        Utc::now().naive_utc(),
    )?;
    Ok(HttpResponse::Ok().json(schedule))
}

#[put("/schedules/{id}")]
pub async fn update_schedule(
    id: web::Path<i32>,
    form: web::Json<ScheduleForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let schedule = schedule_service::update_schedule(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
        Utc::now().naive_utc(),
    )?;
    Ok(HttpResponse::Ok().json(schedule))
}

#[delete("/schedules/{id}")]
pub async fn delete_schedule(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    schedule_service::delete_schedule(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Schedule deleted",
    }))
}
