//! Ticket workflows and the kanban board.

use crate::auth::AuthenticatedUser;
use crate::domain::ticket::{NewTicket, Ticket, UpdateTicket};
use crate::domain::types::{CompanyId, TagId, TicketId, TicketStatus, UserId};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::tickets::{
    NewTicketForm, NewTicketPayload, TicketListParams, UpdateTicketForm, UpdateTicketPayload,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{
    ContactReader, TagReader, TicketListQuery, TicketReader, TicketWriter, UserReader,
};
use crate::services::contacts::ERR_NO_CONTACT_FOUND;
use crate::services::tags::ERR_NO_TAG_FOUND;
use crate::services::users::ERR_NO_USER_FOUND;
use crate::services::{ServiceError, ServiceResult, ensure_admin, identity, log_repo_error};

pub const ERR_NO_TICKET_FOUND: &str = "ERR_NO_TICKET_FOUND";
pub const ERR_TAG_NOT_KANBAN: &str = "ERR_TAG_NOT_KANBAN";

/// Whether the requester may see tickets assigned to other users.
fn sees_all_tickets<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<bool>
where
    R: UserReader + ?Sized,
{
    if user.super_user || user.is_admin() {
        return Ok(true);
    }
    let (company_id, user_id) = identity(user)?;
    Ok(repo
        .get_user_by_id(user_id, company_id)?
        .is_some_and(|stored| stored.preferences.all_ticket))
}

fn load_ticket<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Ticket>
where
    R: TicketReader + UserReader + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let ticket = repo
        .get_ticket_by_id(TicketId::new(id)?, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_TICKET_FOUND))?;

    if !ticket.is_visible_to(user_id) && !sees_all_tickets(repo, user)? {
        return Err(ServiceError::Unauthorized);
    }
    Ok(ticket)
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, ticket: &Ticket) {
    events.publish(RealtimeEvent::record(
        ticket.company_id,
        Resource::Ticket,
        action,
        ticket,
    ));
}

fn ensure_assignable<R>(
    repo: &R,
    company_id: CompanyId,
    user_id: Option<UserId>,
) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    match user_id {
        Some(id) if repo.get_user_by_id(id, company_id)?.is_none() => {
            Err(ServiceError::NotFound(ERR_NO_USER_FOUND))
        }
        _ => Ok(()),
    }
}

pub fn list_tickets<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &TicketListParams,
) -> ServiceResult<Page<Ticket>>
where
    R: TicketReader + UserReader + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let page = PageParams {
        search_param: params.search_param.clone(),
        page_number: params.page_number,
    };

    let mut query = TicketListQuery::new(company_id)
        .search(page.search())
        .paginate(page.page(), DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = params.status()? {
        query = query.status(status);
    }
    if !(params.show_all && sees_all_tickets(repo, user)?) {
        query = query.visible_to(user_id);
    }

    let (count, tickets) = repo
        .list_tickets(query)
        .map_err(log_repo_error("Failed to list tickets"))?;

    Ok(Page::new(tickets, count, page.offset()))
}

pub fn show_ticket<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Ticket>
where
    R: TicketReader + UserReader + ?Sized,
{
    load_ticket(repo, user, id)
}

pub fn create_ticket<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: NewTicketForm,
) -> ServiceResult<Ticket>
where
    R: ContactReader + UserReader + TicketWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let payload = NewTicketPayload::try_from(form)?;

    repo.get_contact_by_id(payload.contact_id, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CONTACT_FOUND))?;
    ensure_assignable(repo, company_id, payload.user_id)?;

    let ticket = repo
        .create_ticket(&NewTicket {
            company_id,
            contact_id: payload.contact_id,
            user_id: payload.user_id,
            status: payload.status,
        })
        .map_err(log_repo_error("Failed to create ticket"))?;

    publish(events, Action::Create, &ticket);

    Ok(ticket)
}

/// Changes status and/or assignee; omitted fields keep their value.
pub fn update_ticket<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdateTicketForm,
) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + UserReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_ticket(repo, user, id)?;
    let payload = UpdateTicketPayload::try_from(form)?;

    let updates = UpdateTicket {
        status: payload.status.unwrap_or(current.status),
        user_id: payload.user_id.unwrap_or(current.user_id),
    };
    ensure_assignable(repo, current.company_id, updates.user_id)?;

    let ticket = repo
        .update_ticket(current.id, &updates)
        .map_err(log_repo_error("Failed to update ticket"))?;

    publish(events, Action::Update, &ticket);

    Ok(ticket)
}

pub fn delete_ticket<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: TicketReader + TicketWriter + UserReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    ensure_admin(user)?;

    let ticket = load_ticket(repo, user, id)?;

    repo.delete_ticket(ticket.id)
        .map_err(log_repo_error("Failed to delete ticket"))?;

    events.publish(RealtimeEvent::deleted(
        ticket.company_id,
        Resource::Ticket,
        ticket.id.get(),
    ));

    Ok(())
}

/// Open and pending tickets with their tags, as shown on the kanban board.
pub fn kanban_tickets<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Ticket>>
where
    R: TicketReader + UserReader + ?Sized,
{
    let (company_id, user_id) = identity(user)?;

    let mut query = TicketListQuery::new(company_id)
        .status(TicketStatus::Open)
        .status(TicketStatus::Pending);
    if !sees_all_tickets(repo, user)? {
        query = query.visible_to(user_id);
    }

    let (_, tickets) = repo
        .list_tickets(query)
        .map_err(log_repo_error("Failed to list kanban tickets"))?;

    Ok(tickets)
}

/// Puts the ticket in the lane of `tag_id`, leaving any other lane.
pub fn move_to_lane<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    ticket_id: i32,
    tag_id: i32,
) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + TagReader + UserReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_ticket(repo, user, ticket_id)?;

    let tag = repo
        .get_tag_by_id(TagId::new(tag_id)?, current.company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_TAG_FOUND))?;
    if !tag.kanban {
        return Err(ServiceError::Form(ERR_TAG_NOT_KANBAN.to_string()));
    }

    let ticket = repo
        .move_ticket_to_lane(current.id, tag.id)
        .map_err(log_repo_error("Failed to move ticket"))?;

    publish(events, Action::Update, &ticket);

    Ok(ticket)
}

pub fn clear_lanes<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    ticket_id: i32,
) -> ServiceResult<Ticket>
where
    R: TicketReader + TicketWriter + UserReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_ticket(repo, user, ticket_id)?;

    let ticket = repo
        .clear_ticket_lanes(current.id)
        .map_err(log_repo_error("Failed to clear ticket lanes"))?;

    publish(events, Action::Update, &ticket);

    Ok(ticket)
}
