//! Contact book workflows.

use crate::auth::AuthenticatedUser;
use crate::domain::contact::{Contact, NewContact};
use crate::domain::types::{CompanyId, ContactId};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::contacts::{BlockContactForm, ContactForm, ContactPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::errors::RepositoryError;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, TagReader};
use crate::services::tags::ERR_NO_TAG_FOUND;
use crate::services::{ServiceError, ServiceResult, ensure_admin, log_repo_error};

pub const ERR_NO_CONTACT_FOUND: &str = "ERR_NO_CONTACT_FOUND";
pub const ERR_DUPLICATED_CONTACT: &str = "ERR_DUPLICATED_CONTACT";

fn load_contact<R>(repo: &R, company_id: CompanyId, id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    repo.get_contact_by_id(ContactId::new(id)?, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CONTACT_FOUND))
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, contact: &Contact) {
    events.publish(RealtimeEvent::record(
        contact.company_id,
        Resource::Contact,
        action,
        contact,
    ));
}

/// Links the submitted tags after checking they belong to the company.
fn apply_tags<R>(
    repo: &R,
    company_id: CompanyId,
    contact_id: ContactId,
    payload: &ContactPayload,
) -> ServiceResult<()>
where
    R: ContactWriter + TagReader + ?Sized,
{
    let Some(tag_ids) = &payload.tags else {
        return Ok(());
    };
    for tag_id in tag_ids {
        if repo.get_tag_by_id(*tag_id, company_id)?.is_none() {
            return Err(ServiceError::NotFound(ERR_NO_TAG_FOUND));
        }
    }
    repo.set_contact_tags(contact_id, tag_ids)
        .map_err(log_repo_error("Failed to link contact tags"))
}

fn duplicate_number(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Duplicate(_) => ServiceError::Conflict(ERR_DUPLICATED_CONTACT),
        other => log_repo_error("Failed to store contact")(other),
    }
}

pub fn list_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<Contact>>
where
    R: ContactReader + ?Sized,
{
    let query = ContactListQuery::new(user.company_id()?)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, contacts) = repo
        .list_contacts(query)
        .map_err(log_repo_error("Failed to list contacts"))?;

    Ok(Page::new(contacts, count, params.offset()))
}

pub fn show_contact<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    load_contact(repo, user.company_id()?, id)
}

pub fn create_contact<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + TagReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let payload = ContactPayload::try_from(form)?;

    if repo
        .get_contact_by_number(&payload.number, company_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict(ERR_DUPLICATED_CONTACT));
    }

    let created = repo
        .create_contact(&payload.to_new(company_id))
        .map_err(duplicate_number)?;

    apply_tags(repo, company_id, created.id, &payload)?;
    let contact = load_contact(repo, company_id, created.id.get())?;

    publish(events, Action::Create, &contact);

    Ok(contact)
}

pub fn update_contact<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + TagReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let current = load_contact(repo, company_id, id)?;
    let payload = ContactPayload::try_from(form)?;

    if payload.number != current.number
        && repo
            .get_contact_by_number(&payload.number, company_id)?
            .is_some()
    {
        return Err(ServiceError::Conflict(ERR_DUPLICATED_CONTACT));
    }

    repo.update_contact(current.id, &payload.to_update())
        .map_err(duplicate_number)?;
    apply_tags(repo, company_id, current.id, &payload)?;
    let contact = load_contact(repo, company_id, id)?;

    publish(events, Action::Update, &contact);

    Ok(contact)
}

/// Blocks (`active = false`) or unblocks a contact.
pub fn block_contact<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: BlockContactForm,
) -> ServiceResult<Contact>
where
    R: ContactReader + ContactWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_contact(repo, user.company_id()?, id)?;

    let contact = repo
        .set_contact_active(current.id, form.active)
        .map_err(log_repo_error("Failed to block contact"))?;

    publish(events, Action::Update, &contact);

    Ok(contact)
}

pub fn delete_contact<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: ContactReader + ContactWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    ensure_admin(user)?;

    let contact = load_contact(repo, user.company_id()?, id)?;

    repo.delete_contact(contact.id)
        .map_err(log_repo_error("Failed to delete contact"))?;

    events.publish(RealtimeEvent::deleted(
        contact.company_id,
        Resource::Contact,
        contact.id.get(),
    ));

    Ok(())
}

/// Bulk insert from a parsed CSV; returns how many rows were new.
pub fn import_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    contacts: &[NewContact],
) -> ServiceResult<usize>
where
    R: ContactWriter + ?Sized,
{
    ensure_admin(user)?;

    let inserted = repo
        .import_contacts(contacts)
        .map_err(log_repo_error("Failed to import contacts"))?;

    log::info!(
        "Imported {inserted} of {} contacts for company {}",
        contacts.len(),
        user.company_id
    );

    Ok(inserted)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{ContactChannel, ContactName, PhoneNumber};
    use crate::events::recording::RecordingPublisher;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::*;
    use serde_json::json;

    fn contact(id: i32) -> Contact {
        Contact {
            id: ContactId::new(id).unwrap(),
            company_id: CompanyId::new(7).unwrap(),
            name: ContactName::new("Ana").unwrap(),
            number: PhoneNumber::new("+5511999990000").unwrap(),
            email: None,
            is_group: false,
            active: true,
            channel: ContactChannel::Whatsapp,
            tags: Vec::new(),
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn form(tags: Option<Vec<i32>>) -> ContactForm {
        ContactForm {
            name: "Ana".into(),
            number: "5511999990000".into(),
            email: None,
            channel: None,
            is_group: false,
            tags,
        }
    }

    #[test]
    fn duplicate_number_is_rejected_before_insert() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_by_number()
            .returning(|_, _| Ok(Some(contact(1))));
        repo.expect_create_contact().never();
        let events = RecordingPublisher::default();

        let result = create_contact(&repo, &events, &agent(), form(None));

        assert!(matches!(result, Err(ServiceError::Conflict(ERR_DUPLICATED_CONTACT))));
    }

    #[test]
    fn create_links_tags_and_publishes() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_by_number().returning(|_, _| Ok(None));
        repo.expect_create_contact().returning(|_| Ok(contact(5)));
        repo.expect_get_tag_by_id().returning(|id, company_id| {
            Ok(Some(crate::domain::tag::Tag {
                id,
                company_id,
                name: crate::domain::types::TagName::new("Lead").unwrap(),
                color: crate::domain::types::HexColor::new("#000000").unwrap(),
                kanban: false,
                created_at: epoch(),
                updated_at: epoch(),
            }))
        });
        repo.expect_set_contact_tags()
            .withf(|id, tags| id.get() == 5 && tags.len() == 2)
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_get_contact_by_id()
            .returning(|id, _| Ok(Some(contact(id.get()))));
        let events = RecordingPublisher::default();

        create_contact(&repo, &events, &agent(), form(Some(vec![1, 2]))).unwrap();

        let events = events.take();
        assert_eq!(events[0].event, "company-7-contact");
        assert_eq!(events[0].payload["contact"]["number"], json!("+5511999990000"));
    }

    #[test]
    fn agents_cannot_delete_contacts() {
        let repo = MockRepository::new();
        let events = RecordingPublisher::default();
        assert!(matches!(
            delete_contact(&repo, &events, &agent(), 1),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn delete_publishes_contact_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_by_id()
            .returning(|id, _| Ok(Some(contact(id.get()))));
        repo.expect_delete_contact().returning(|_| Ok(()));
        let events = RecordingPublisher::default();

        delete_contact(&repo, &events, &admin(), 4).unwrap();

        assert_eq!(
            events.take()[0].payload,
            json!({"action": "delete", "contactId": 4})
        );
    }
}
