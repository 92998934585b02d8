//! Canned replies, private to their author unless shared (`geral`).

use crate::auth::AuthenticatedUser;
use crate::domain::quick_message::{NewQuickMessage, QuickMessage, UpdateQuickMessage};
use crate::domain::types::QuickMessageId;
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::quick_messages::QuickMessageForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::errors::RepositoryError;
use crate::repository::{QuickMessageListQuery, QuickMessageReader, QuickMessageWriter};
use crate::services::{ServiceError, ServiceResult, identity, log_repo_error};

pub const ERR_NO_QUICKMESSAGE_FOUND: &str = "ERR_NO_QUICKMESSAGE_FOUND";
pub const ERR_SHORTCODE_ALREADY_EXISTS: &str = "ERR_SHORTCODE_ALREADY_EXISTS";

fn load_visible<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<QuickMessage>
where
    R: QuickMessageReader + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    repo.get_quick_message_by_id(QuickMessageId::new(id)?, company_id)?
        .filter(|record| record.geral || record.user_id == user_id || user.is_admin())
        .ok_or(ServiceError::NotFound(ERR_NO_QUICKMESSAGE_FOUND))
}

/// Only the author or an admin may change a record.
fn ensure_owner(user: &AuthenticatedUser, record: &QuickMessage) -> ServiceResult<()> {
    if user.is_admin() || user.super_user || record.user_id == user.user_id()? {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

fn shortcode_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Duplicate(_) => ServiceError::Conflict(ERR_SHORTCODE_ALREADY_EXISTS),
        other => log_repo_error("Failed to store quick message")(other),
    }
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, record: &QuickMessage) {
    events.publish(RealtimeEvent::record(
        record.company_id,
        Resource::QuickMessage,
        action,
        record,
    ));
}

pub fn list_quick_messages<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<QuickMessage>>
where
    R: QuickMessageReader + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let query = QuickMessageListQuery::new(company_id, user_id)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, records) = repo
        .list_quick_messages(query)
        .map_err(log_repo_error("Failed to list quick messages"))?;

    Ok(Page::new(records, count, params.offset()))
}

pub fn show_quick_message<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<QuickMessage>
where
    R: QuickMessageReader + ?Sized,
{
    load_visible(repo, user, id)
}

pub fn create_quick_message<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: QuickMessageForm,
) -> ServiceResult<QuickMessage>
where
    R: QuickMessageWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let fields = UpdateQuickMessage::try_from(form)?;

    let record = repo
        .create_quick_message(&NewQuickMessage {
            company_id,
            user_id,
            shortcode: fields.shortcode,
            message: fields.message,
            geral: fields.geral,
        })
        .map_err(shortcode_conflict)?;

    publish(events, Action::Create, &record);

    Ok(record)
}

pub fn update_quick_message<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: QuickMessageForm,
) -> ServiceResult<QuickMessage>
where
    R: QuickMessageReader + QuickMessageWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_visible(repo, user, id)?;
    ensure_owner(user, &current)?;

    let updates = UpdateQuickMessage::try_from(form)?;

    let record = repo
        .update_quick_message(current.id, &updates)
        .map_err(shortcode_conflict)?;

    publish(events, Action::Update, &record);

    Ok(record)
}

pub fn delete_quick_message<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: QuickMessageReader + QuickMessageWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let record = load_visible(repo, user, id)?;
    ensure_owner(user, &record)?;

    repo.delete_quick_message(record.id)
        .map_err(log_repo_error("Failed to delete quick message"))?;

    events.publish(RealtimeEvent::deleted(
        record.company_id,
        Resource::QuickMessage,
        record.id.get(),
    ));

    Ok(())
}
