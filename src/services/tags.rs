//! Tag and kanban lane management.

use crate::auth::AuthenticatedUser;
use crate::domain::tag::Tag;
use crate::domain::types::TagId;
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::tags::{TagForm, TagListParams, TagPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{TagListQuery, TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult, log_repo_error};

pub const ERR_NO_TAG_FOUND: &str = "ERR_NO_TAG_FOUND";
pub const ERR_TAG_ALREADY_EXISTS: &str = "ERR_TAG_ALREADY_EXISTS";

fn load_tag<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(TagId::new(id)?, user.company_id()?)?
        .ok_or(ServiceError::NotFound(ERR_NO_TAG_FOUND))
}

/// Maps a unique-name violation to a readable conflict.
fn name_conflict(err: ServiceError) -> ServiceError {
    match err {
        ServiceError::Repository(crate::repository::errors::RepositoryError::Duplicate(_)) => {
            ServiceError::Conflict(ERR_TAG_ALREADY_EXISTS)
        }
        other => other,
    }
}

pub fn list_tags<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &TagListParams,
) -> ServiceResult<Page<Tag>>
where
    R: TagReader + ?Sized,
{
    let page = PageParams {
        search_param: params.search_param.clone(),
        page_number: params.page_number,
    };

    let mut query = TagListQuery::new(user.company_id()?)
        .search(page.search())
        .paginate(page.page(), DEFAULT_ITEMS_PER_PAGE);
    if let Some(kanban) = params.kanban {
        query = query.kanban(kanban);
    }

    let (count, tags) = repo
        .list_tags(query)
        .map_err(log_repo_error("Failed to list tags"))?;

    Ok(Page::new(tags, count, page.offset()))
}

/// Every tag of the company, optionally only kanban lanes.
pub fn list_all_tags<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kanban_only: bool,
) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    let mut query = TagListQuery::new(user.company_id()?);
    if kanban_only {
        query = query.kanban(true);
    }

    let (_, tags) = repo
        .list_tags(query)
        .map_err(log_repo_error("Failed to list tags"))?;

    Ok(tags)
}

pub fn show_tag<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    load_tag(repo, user, id)
}

pub fn create_tag<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: TagForm,
) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let new_tag = TagPayload::try_from(form)?.into_new(company_id);

    let tag = repo
        .create_tag(&new_tag)
        .map_err(log_repo_error("Failed to create tag"))
        .map_err(name_conflict)?;

    events.publish(RealtimeEvent::record(
        company_id,
        Resource::Tag,
        Action::Create,
        &tag,
    ));

    Ok(tag)
}

pub fn update_tag<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: TagForm,
) -> ServiceResult<Tag>
where
    R: TagReader + TagWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_tag(repo, user, id)?;
    let updates = TagPayload::try_from(form)?.into_update();

    let tag = repo
        .update_tag(current.id, &updates)
        .map_err(log_repo_error("Failed to update tag"))
        .map_err(name_conflict)?;

    events.publish(RealtimeEvent::record(
        tag.company_id,
        Resource::Tag,
        Action::Update,
        &tag,
    ));

    Ok(tag)
}

pub fn delete_tag<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: TagReader + TagWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let tag = load_tag(repo, user, id)?;

    repo.delete_tag(tag.id)
        .map_err(log_repo_error("Failed to delete tag"))?;

    events.publish(RealtimeEvent::deleted(
        tag.company_id,
        Resource::Tag,
        tag.id.get(),
    ));

    Ok(())
}
