//! Diesel models for scheduled messages.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::schedule::{
    NewSchedule as DomainNewSchedule, Schedule as DomainSchedule,
    UpdateSchedule as DomainUpdateSchedule,
};
use crate::domain::types::{
    CompanyId, ContactId, MessageBody, ScheduleId, ScheduleStatus, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::schedules)]
pub struct Schedule {
    pub id: i32,
    pub company_id: i32,
    pub contact_id: i32,
    pub user_id: Option<i32>,
    pub body: String,
    pub send_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::schedules)]
pub struct NewSchedule<'a> {
    pub company_id: i32,
    pub contact_id: i32,
    pub user_id: Option<i32>,
    pub body: &'a str,
    pub send_at: NaiveDateTime,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::schedules)]
pub struct UpdateSchedule<'a> {
    pub contact_id: i32,
    pub body: &'a str,
    pub send_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Schedule> for DomainSchedule {
    type Error = TypeConstraintError;

    fn try_from(schedule: Schedule) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ScheduleId::try_from(schedule.id)?,
            company_id: CompanyId::try_from(schedule.company_id)?,
            contact_id: ContactId::try_from(schedule.contact_id)?,
            user_id: schedule.user_id.map(UserId::try_from).transpose()?,
            body: MessageBody::new(schedule.body)?,
            send_at: schedule.send_at,
            sent_at: schedule.sent_at,
            status: schedule.status.parse::<ScheduleStatus>()?,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewSchedule> for NewSchedule<'a> {
    fn from(schedule: &'a DomainNewSchedule) -> Self {
        Self {
            company_id: schedule.company_id.get(),
            contact_id: schedule.contact_id.get(),
            user_id: schedule.user_id.map(UserId::get),
            body: schedule.body.as_str(),
            send_at: schedule.send_at,
            status: ScheduleStatus::Pending.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateSchedule> for UpdateSchedule<'a> {
    fn from(schedule: &'a DomainUpdateSchedule) -> Self {
        Self {
            contact_id: schedule.contact_id.get(),
            body: schedule.body.as_str(),
            send_at: schedule.send_at,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
