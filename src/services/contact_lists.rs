//! Contact lists: named, static audiences for campaigns.

use crate::auth::AuthenticatedUser;
use crate::domain::contact_list::{
    ContactList, ContactListItem, NewContactList, NewContactListItem, UpdateContactListItem,
};
use crate::domain::types::{CompanyId, ContactListId, ContactListItemId, ContactListName};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::contact_lists::{ContactListForm, ContactListItemForm, ContactListItemParams};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    ContactListItemQuery, ContactListReader, ContactListWriter, ContactListsQuery,
};
use crate::services::contacts::ERR_DUPLICATED_CONTACT;
use crate::services::{ServiceError, ServiceResult, log_repo_error};

pub const ERR_NO_CONTACTLIST_FOUND: &str = "ERR_NO_CONTACTLIST_FOUND";
pub const ERR_NO_CONTACTLISTITEM_FOUND: &str = "ERR_NO_CONTACTLISTITEM_FOUND";

fn load_list<R>(repo: &R, company_id: CompanyId, id: ContactListId) -> ServiceResult<ContactList>
where
    R: ContactListReader + ?Sized,
{
    repo.get_contact_list_by_id(id, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CONTACTLIST_FOUND))
}

fn load_item<R>(repo: &R, company_id: CompanyId, id: i32) -> ServiceResult<ContactListItem>
where
    R: ContactListReader + ?Sized,
{
    repo.get_contact_list_item_by_id(ContactListItemId::new(id)?, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CONTACTLISTITEM_FOUND))
}

fn publish_list<E: EventPublisher + ?Sized>(events: &E, action: Action, list: &ContactList) {
    events.publish(RealtimeEvent::record(
        list.company_id,
        Resource::ContactList,
        action,
        list,
    ));
}

fn publish_item<E: EventPublisher + ?Sized>(events: &E, action: Action, item: &ContactListItem) {
    events.publish(RealtimeEvent::record(
        item.company_id,
        Resource::ContactListItem,
        action,
        item,
    ));
}

/// Re-reads the list so subscribers see the new `contactsCount`.
fn refresh_list<R, E>(repo: &R, events: &E, company_id: CompanyId, id: ContactListId)
where
    R: ContactListReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    match repo.get_contact_list_by_id(id, company_id) {
        Ok(Some(list)) => publish_list(events, Action::Update, &list),
        Ok(None) => {}
        Err(err) => log::warn!("Failed to reload contact list {id}: {err}"),
    }
}

fn duplicate_number(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Duplicate(_) => ServiceError::Conflict(ERR_DUPLICATED_CONTACT),
        other => log_repo_error("Failed to store contact list item")(other),
    }
}

pub fn list_contact_lists<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<ContactList>>
where
    R: ContactListReader + ?Sized,
{
    let query = ContactListsQuery::new(user.company_id()?)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, lists) = repo
        .list_contact_lists(query)
        .map_err(log_repo_error("Failed to list contact lists"))?;

    Ok(Page::new(lists, count, params.offset()))
}

/// Every list of the company, for campaign audience pickers.
pub fn all_contact_lists<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ContactList>>
where
    R: ContactListReader + ?Sized,
{
    let (_, lists) = repo
        .list_contact_lists(ContactListsQuery::new(user.company_id()?))
        .map_err(log_repo_error("Failed to list contact lists"))?;
    Ok(lists)
}

pub fn show_contact_list<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<ContactList>
where
    R: ContactListReader + ?Sized,
{
    load_list(repo, user.company_id()?, ContactListId::new(id)?)
}

pub fn create_contact_list<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: ContactListForm,
) -> ServiceResult<ContactList>
where
    R: ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let name = ContactListName::try_from(form)?;

    let list = repo
        .create_contact_list(&NewContactList {
            company_id: user.company_id()?,
            name,
        })
        .map_err(log_repo_error("Failed to create contact list"))?;

    publish_list(events, Action::Create, &list);

    Ok(list)
}

pub fn update_contact_list<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: ContactListForm,
) -> ServiceResult<ContactList>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_list(repo, user.company_id()?, ContactListId::new(id)?)?;
    let name = ContactListName::try_from(form)?;

    let list = repo
        .rename_contact_list(current.id, &name)
        .map_err(log_repo_error("Failed to update contact list"))?;

    publish_list(events, Action::Update, &list);

    Ok(list)
}

/// Items go with the list; campaigns using it are left without an audience.
pub fn delete_contact_list<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let list = load_list(repo, user.company_id()?, ContactListId::new(id)?)?;

    repo.delete_contact_list(list.id)
        .map_err(log_repo_error("Failed to delete contact list"))?;

    events.publish(RealtimeEvent::deleted(
        list.company_id,
        Resource::ContactList,
        list.id.get(),
    ));

    Ok(())
}

/// Bulk insert into a list; numbers already on it are skipped.
pub fn import_contact_list_items<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: ContactListId,
    items: &[NewContactListItem],
) -> ServiceResult<usize>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let list = load_list(repo, user.company_id()?, id)?;
    if items
        .iter()
        .any(|item| item.contact_list_id != list.id || item.company_id != list.company_id)
    {
        return Err(ServiceError::NotFound(ERR_NO_CONTACTLIST_FOUND));
    }

    let inserted = repo
        .import_contact_list_items(items)
        .map_err(log_repo_error("Failed to import contact list items"))?;

    log::info!(
        "Imported {inserted} of {} items into contact list {}",
        items.len(),
        list.id
    );
    refresh_list(repo, events, list.company_id, list.id);

    Ok(inserted)
}

pub fn list_contact_list_items<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ContactListItemParams,
) -> ServiceResult<Page<ContactListItem>>
where
    R: ContactListReader + ?Sized,
{
    let page = PageParams {
        search_param: params.search_param.clone(),
        page_number: params.page_number,
    };
    let company_id = user.company_id()?;
    let list = load_list(repo, company_id, ContactListId::new(params.contact_list_id)?)?;

    let query = ContactListItemQuery::new(company_id, list.id)
        .search(page.search())
        .paginate(page.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, items) = repo
        .list_contact_list_items(query)
        .map_err(log_repo_error("Failed to list contact list items"))?;

    Ok(Page::new(items, count, page.offset()))
}

pub fn show_contact_list_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<ContactListItem>
where
    R: ContactListReader + ?Sized,
{
    load_item(repo, user.company_id()?, id)
}

pub fn create_contact_list_item<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: ContactListItemForm,
) -> ServiceResult<ContactListItem>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let list = load_list(repo, company_id, form.contact_list_id()?)?;
    let fields = UpdateContactListItem::try_from(form)?;

    let item = repo
        .create_contact_list_item(&fields.into_new(company_id, list.id))
        .map_err(duplicate_number)?;

    publish_item(events, Action::Create, &item);
    refresh_list(repo, events, company_id, list.id);

    Ok(item)
}

pub fn update_contact_list_item<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: ContactListItemForm,
) -> ServiceResult<ContactListItem>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_item(repo, user.company_id()?, id)?;
    let updates = UpdateContactListItem::try_from(form)?;

    let item = repo
        .update_contact_list_item(current.id, &updates)
        .map_err(duplicate_number)?;

    publish_item(events, Action::Update, &item);

    Ok(item)
}

pub fn delete_contact_list_item<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: ContactListReader + ContactListWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let item = load_item(repo, user.company_id()?, id)?;

    repo.delete_contact_list_item(item.id)
        .map_err(log_repo_error("Failed to delete contact list item"))?;

    events.publish(RealtimeEvent::deleted(
        item.company_id,
        Resource::ContactListItem,
        item.id.get(),
    ));
    refresh_list(repo, events, item.company_id, item.contact_list_id);

    Ok(())
}
