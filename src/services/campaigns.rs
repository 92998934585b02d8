//! Campaign records and their status transitions. Dispatching happens elsewhere.

use crate::auth::AuthenticatedUser;
use crate::domain::campaign::Campaign;
use crate::domain::types::{CampaignId, CampaignStatus, CompanyId};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::campaigns::{CampaignForm, CampaignPayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{CampaignListQuery, CampaignReader, CampaignWriter, ContactListReader};
use crate::services::contact_lists::ERR_NO_CONTACTLIST_FOUND;
use crate::services::{ServiceError, ServiceResult, log_repo_error};

pub const ERR_NO_CAMPAIGN_FOUND: &str = "ERR_NO_CAMPAIGN_FOUND";
pub const ERR_CAMPAIGN_IN_PROGRESS: &str = "ERR_CAMPAIGN_IN_PROGRESS";
pub const ERR_INVALID_CAMPAIGN_STATUS: &str = "ERR_INVALID_CAMPAIGN_STATUS";

fn load_campaign<R>(repo: &R, company_id: CompanyId, id: i32) -> ServiceResult<Campaign>
where
    R: CampaignReader + ?Sized,
{
    repo.get_campaign_by_id(CampaignId::new(id)?, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CAMPAIGN_FOUND))
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, campaign: &Campaign) {
    events.publish(RealtimeEvent::record(
        campaign.company_id,
        Resource::Campaign,
        action,
        campaign,
    ));
}

fn validate_payload<R>(
    repo: &R,
    company_id: CompanyId,
    form: CampaignForm,
) -> ServiceResult<CampaignPayload>
where
    R: ContactListReader + ?Sized,
{
    let payload = CampaignPayload::try_from(form)?;
    if let Some(list_id) = payload.contact_list_id
        && repo.get_contact_list_by_id(list_id, company_id)?.is_none()
    {
        return Err(ServiceError::NotFound(ERR_NO_CONTACTLIST_FOUND));
    }
    Ok(payload)
}

pub fn list_campaigns<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &PageParams,
) -> ServiceResult<Page<Campaign>>
where
    R: CampaignReader + ?Sized,
{
    let query = CampaignListQuery::new(user.company_id()?)
        .search(params.search())
        .paginate(params.page(), DEFAULT_ITEMS_PER_PAGE);

    let (count, campaigns) = repo
        .list_campaigns(query)
        .map_err(log_repo_error("Failed to list campaigns"))?;

    Ok(Page::new(campaigns, count, params.offset()))
}

pub fn show_campaign<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Campaign>
where
    R: CampaignReader + ?Sized,
{
    load_campaign(repo, user.company_id()?, id)
}

/// New campaigns are `PROGRAMADA` when scheduled and `INATIVA` otherwise.
pub fn create_campaign<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: CampaignForm,
) -> ServiceResult<Campaign>
where
    R: CampaignWriter + ContactListReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let new_campaign = validate_payload(repo, company_id, form)?.into_new(company_id);

    let campaign = repo
        .create_campaign(&new_campaign)
        .map_err(log_repo_error("Failed to create campaign"))?;

    publish(events, Action::Create, &campaign);

    Ok(campaign)
}

/// Running campaigns are frozen.
pub fn update_campaign<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: CampaignForm,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ContactListReader + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let current = load_campaign(repo, company_id, id)?;
    if !current.status.is_editable() {
        return Err(ServiceError::Conflict(ERR_CAMPAIGN_IN_PROGRESS));
    }

    let updates = validate_payload(repo, company_id, form)?.into_update();

    let campaign = repo
        .update_campaign(current.id, &updates)
        .map_err(log_repo_error("Failed to update campaign"))?;

    publish(events, Action::Update, &campaign);

    Ok(campaign)
}

pub fn delete_campaign<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: CampaignReader + CampaignWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let campaign = load_campaign(repo, user.company_id()?, id)?;

    repo.delete_campaign(campaign.id)
        .map_err(log_repo_error("Failed to delete campaign"))?;

    events.publish(RealtimeEvent::deleted(
        campaign.company_id,
        Resource::Campaign,
        campaign.id.get(),
    ));

    Ok(())
}

fn transition<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    next: fn(CampaignStatus) -> Option<CampaignStatus>,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let current = load_campaign(repo, user.company_id()?, id)?;
    let status = next(current.status)
        .ok_or_else(|| ServiceError::Form(ERR_INVALID_CAMPAIGN_STATUS.to_string()))?;

    let campaign = repo
        .set_campaign_status(current.id, status)
        .map_err(log_repo_error("Failed to change campaign status"))?;

    log::info!(
        "Campaign {} moved from {} to {}",
        campaign.id,
        current.status,
        campaign.status
    );
    publish(events, Action::Update, &campaign);

    Ok(campaign)
}

/// `EM_ANDAMENTO` or `PROGRAMADA` → `CANCELADA`.
pub fn cancel_campaign<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    transition(repo, events, user, id, CampaignStatus::cancelled)
}

/// `CANCELADA` → `EM_ANDAMENTO`.
pub fn restart_campaign<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    transition(repo, events, user, id, CampaignStatus::restarted)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::contact_list::ContactList;
    use crate::domain::types::{CampaignName, ContactListName, MessageBody};
    use crate::events::recording::RecordingPublisher;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::*;
    use serde_json::json;

    fn campaign(id: CampaignId, status: CampaignStatus) -> Campaign {
        Campaign {
            id,
            company_id: CompanyId::new(7).unwrap(),
            name: CampaignName::new("Promo").unwrap(),
            message: MessageBody::new("Hi").unwrap(),
            status,
            contact_list_id: None,
            contact_list: None,
            whatsapp_id: None,
            scheduled_at: None,
            completed_at: None,
            confirmation: false,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn form() -> CampaignForm {
        CampaignForm {
            name: "Promo".into(),
            message: "Hi".into(),
            contact_list_id: None,
            whatsapp_id: None,
            scheduled_at: None,
            confirmation: false,
        }
    }

    #[test]
    fn running_campaign_cannot_be_edited() {
        let mut repo = MockRepository::new();
        repo.expect_get_campaign_by_id()
            .returning(|id, _| Ok(Some(campaign(id, CampaignStatus::InProgress))));
        repo.expect_update_campaign().never();
        let events = RecordingPublisher::default();

        let result = update_campaign(&repo, &events, &agent(), 1, form());

        assert!(matches!(result, Err(ServiceError::Conflict(ERR_CAMPAIGN_IN_PROGRESS))));
    }

    #[test]
    fn cancel_from_scheduled_publishes_record() {
        let mut repo = MockRepository::new();
        repo.expect_get_campaign_by_id()
            .returning(|id, _| Ok(Some(campaign(id, CampaignStatus::Scheduled))));
        repo.expect_set_campaign_status()
            .withf(|_, status| *status == CampaignStatus::Cancelled)
            .returning(|id, status| Ok(campaign(id, status)));
        let events = RecordingPublisher::default();

        let cancelled = cancel_campaign(&repo, &events, &agent(), 1).unwrap();

        assert_eq!(cancelled.status, CampaignStatus::Cancelled);
        let events = events.take();
        assert_eq!(events[0].event, "company-7-campaign");
        assert_eq!(events[0].payload["record"]["status"], json!("CANCELADA"));
    }

    #[test]
    fn restart_requires_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_campaign_by_id()
            .returning(|id, _| Ok(Some(campaign(id, CampaignStatus::Finished))));
        repo.expect_set_campaign_status().never();
        let events = RecordingPublisher::default();

        let result = restart_campaign(&repo, &events, &agent(), 1);

        assert!(
            matches!(result, Err(ServiceError::Form(code)) if code == ERR_INVALID_CAMPAIGN_STATUS)
        );
    }

    #[test]
    fn audience_list_must_exist() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_list_by_id().returning(|_, _| Ok(None));
        repo.expect_create_campaign().never();
        let events = RecordingPublisher::default();

        let mut form = form();
        form.contact_list_id = Some(9);
        let result = create_campaign(&repo, &events, &agent(), form);

        assert!(matches!(result, Err(ServiceError::NotFound(ERR_NO_CONTACTLIST_FOUND))));
    }

    #[test]
    fn audience_list_is_checked_in_the_requesters_company() {
        let mut repo = MockRepository::new();
        repo.expect_get_contact_list_by_id()
            .withf(|id, company_id| id.get() == 4 && company_id.get() == 7)
            .returning(|id, company_id| {
                Ok(Some(ContactList {
                    id,
                    company_id,
                    name: ContactListName::new("VIP").unwrap(),
                    contacts_count: 2,
                    created_at: epoch(),
                    updated_at: epoch(),
                }))
            });
        repo.expect_create_campaign().returning(|new_campaign| {
            let mut record = campaign(CampaignId::new(1).unwrap(), CampaignStatus::Inactive);
            record.contact_list_id = new_campaign.contact_list_id;
            Ok(record)
        });
        let events = RecordingPublisher::default();

        let mut form = form();
        form.contact_list_id = Some(4);
        let created = create_campaign(&repo, &events, &agent(), form).unwrap();

        assert_eq!(created.contact_list_id.map(|id| id.get()), Some(4));
    }
}
