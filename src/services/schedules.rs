//! Scheduled message records.

use chrono::NaiveDateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::schedule::{NewSchedule, Schedule, UpdateSchedule};
use crate::domain::types::{CompanyId, ContactId, ScheduleId};
use crate::events::{Action, EventPublisher, RealtimeEvent, Resource};
use crate::forms::schedules::{ScheduleForm, ScheduleListParams, SchedulePayload};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page, PageParams};
use crate::repository::{ContactReader, ScheduleListQuery, ScheduleReader, ScheduleWriter};
use crate::services::contacts::ERR_NO_CONTACT_FOUND;
use crate::services::{ServiceError, ServiceResult, identity, log_repo_error};

pub const ERR_NO_SCHEDULE_FOUND: &str = "ERR_NO_SCHEDULE_FOUND";
pub const ERR_SCHEDULE_ALREADY_SENT: &str = "ERR_SCHEDULE_ALREADY_SENT";

fn load_schedule<R>(repo: &R, company_id: CompanyId, id: i32) -> ServiceResult<Schedule>
where
    R: ScheduleReader + ?Sized,
{
    repo.get_schedule_by_id(ScheduleId::new(id)?, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_SCHEDULE_FOUND))
}

fn publish<E: EventPublisher + ?Sized>(events: &E, action: Action, schedule: &Schedule) {
    events.publish(RealtimeEvent::record(
        schedule.company_id,
        Resource::Schedule,
        action,
        schedule,
    ));
}

fn validated<R>(
    repo: &R,
    company_id: CompanyId,
    form: ScheduleForm,
    now: NaiveDateTime,
) -> ServiceResult<SchedulePayload>
where
    R: ContactReader + ?Sized,
{
    let payload = form.into_payload(now)?;
    repo.get_contact_by_id(payload.contact_id, company_id)?
        .ok_or(ServiceError::NotFound(ERR_NO_CONTACT_FOUND))?;
    Ok(payload)
}

pub fn list_schedules<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &ScheduleListParams,
) -> ServiceResult<Page<Schedule>>
where
    R: ScheduleReader + ?Sized,
{
    let page = PageParams {
        search_param: params.search_param.clone(),
        page_number: params.page_number,
    };

    let mut query = ScheduleListQuery::new(user.company_id()?)
        .search(page.search())
        .paginate(page.page(), DEFAULT_ITEMS_PER_PAGE);
    if let Some(contact_id) = params.contact_id {
        query = query.contact(ContactId::new(contact_id)?);
    }

    let (count, schedules) = repo
        .list_schedules(query)
        .map_err(log_repo_error("Failed to list schedules"))?;

    Ok(Page::new(schedules, count, page.offset()))
}

pub fn show_schedule<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Schedule>
where
    R: ScheduleReader + ?Sized,
{
    load_schedule(repo, user.company_id()?, id)
}

pub fn create_schedule<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    form: ScheduleForm,
    now: NaiveDateTime,
) -> ServiceResult<Schedule>
where
    R: ContactReader + ScheduleWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let (company_id, user_id) = identity(user)?;
    let payload = validated(repo, company_id, form, now)?;

    let schedule = repo
        .create_schedule(&NewSchedule {
            company_id,
            contact_id: payload.contact_id,
            user_id: Some(user_id),
            body: payload.body,
            send_at: payload.send_at,
        })
        .map_err(log_repo_error("Failed to create schedule"))?;

    publish(events, Action::Create, &schedule);

    Ok(schedule)
}

pub fn update_schedule<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
    form: ScheduleForm,
    now: NaiveDateTime,
) -> ServiceResult<Schedule>
where
    R: ContactReader + ScheduleReader + ScheduleWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let company_id = user.company_id()?;
    let current = load_schedule(repo, company_id, id)?;
    if current.is_sent() {
        return Err(ServiceError::Conflict(ERR_SCHEDULE_ALREADY_SENT));
    }

    let payload = validated(repo, company_id, form, now)?;

    let schedule = repo
        .update_schedule(
            current.id,
            &UpdateSchedule {
                contact_id: payload.contact_id,
                body: payload.body,
                send_at: payload.send_at,
            },
        )
        .map_err(log_repo_error("Failed to update schedule"))?;

    publish(events, Action::Update, &schedule);

    Ok(schedule)
}

pub fn delete_schedule<R, E>(
    repo: &R,
    events: &E,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<()>
where
    R: ScheduleReader + ScheduleWriter + ?Sized,
    E: EventPublisher + ?Sized,
{
    let schedule = load_schedule(repo, user.company_id()?, id)?;

    repo.delete_schedule(schedule.id)
        .map_err(log_repo_error("Failed to delete schedule"))?;

    events.publish(RealtimeEvent::deleted(
        schedule.company_id,
        Resource::Schedule,
        schedule.id.get(),
    ));

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::{MessageBody, ScheduleStatus};
    use crate::events::recording::RecordingPublisher;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn schedule(id: ScheduleId, status: ScheduleStatus) -> Schedule {
        Schedule {
            id,
            company_id: CompanyId::new(7).unwrap(),
            contact_id: ContactId::new(1).unwrap(),
            user_id: None,
            body: MessageBody::new("Reminder").unwrap(),
            send_at: now(),
            sent_at: None,
            status,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn form() -> ScheduleForm {
        ScheduleForm {
            contact_id: 1,
            body: "Reminder".into(),
            send_at: "2025-05-02T09:00:00Z".into(),
        }
    }

    #[test]
    fn sent_schedule_is_frozen() {
        let mut repo = MockRepository::new();
        repo.expect_get_schedule_by_id()
            .returning(|id, _| Ok(Some(schedule(id, ScheduleStatus::Sent))));
        repo.expect_update_schedule().never();
        let events = RecordingPublisher::default();

        let result = update_schedule(&repo, &events, &agent(), 1, form(), now());

        assert!(matches!(result, Err(ServiceError::Conflict(ERR_SCHEDULE_ALREADY_SENT))));
    }

    #[test]
    fn past_send_at_is_rejected() {
        let repo = MockRepository::new();
        let events = RecordingPublisher::default();
        let mut form = form();
        form.send_at = "2025-04-30T09:00:00Z".into();

        let result = create_schedule(&repo, &events, &agent(), form, now());

        assert!(matches!(result, Err(ServiceError::Form(code)) if code == "ERR_INVALID_DATE"));
    }

    #[test]
    fn delete_publishes_schedule_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_schedule_by_id()
            .returning(|id, _| Ok(Some(schedule(id, ScheduleStatus::Pending))));
        repo.expect_delete_schedule().returning(|_| Ok(()));
        let events = RecordingPublisher::default();

        delete_schedule(&repo, &events, &agent(), 6).unwrap();

        assert_eq!(
            events.take()[0].payload,
            json!({"action": "delete", "scheduleId": 6})
        );
    }
}
