use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::auth::MessageResponse;
use crate::dto::lists::TicketsResponse;
use crate::events::EventPublisher;
use crate::forms::tickets::{NewTicketForm, TicketListParams, UpdateTicketForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, tickets as ticket_service};

#[get("/tickets")]
pub async fn list_tickets(
    params: web::Query<TicketListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = ticket_service::list_tickets(repo.get_ref(), &user, &params)?;
    Ok(HttpResponse::Ok().json(TicketsResponse::from(page)))
}

#[get("/tickets/{id}")]
pub async fn show_ticket(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let ticket = ticket_service::show_ticket(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(ticket))
}

#[post("/tickets")]
pub async fn create_ticket(
    form: web::Json<NewTicketForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let ticket =
        ticket_service::create_ticket(repo.get_ref(), events.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Ok().json(ticket))
}

#[put("/tickets/{id}")]
pub async fn update_ticket(
    id: web::Path<i32>,
    form: web::Json<UpdateTicketForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let ticket = ticket_service::update_ticket(
        repo.get_ref(),
        events.get_ref(),
        &user,
        id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(ticket))
}

#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    ticket_service::delete_ticket(repo.get_ref(), events.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Ticket deleted",
    }))
}

#[get("/ticket/kanban")]
pub async fn kanban(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tickets = ticket_service::kanban_tickets(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(tickets))
}

#[put("/ticket-tags/{ticket_id}/{tag_id}")]
pub async fn move_to_lane(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let (ticket_id, tag_id) = path.into_inner();
    let ticket =
        ticket_service::move_to_lane(repo.get_ref(), events.get_ref(), &user, ticket_id, tag_id)?;
    Ok(HttpResponse::Ok().json(ticket))
}

#[delete("/ticket-tags/{ticket_id}")]
pub async fn clear_lanes(
    ticket_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    events: web::Data<dyn EventPublisher>,
) -> Result<HttpResponse, ServiceError> {
    let ticket = ticket_service::clear_lanes(
        repo.get_ref(),
        events.get_ref(),
        &user,
        ticket_id.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(ticket))
}
