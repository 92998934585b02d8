use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, ContactId, MessageBody, ScheduleId, ScheduleStatus, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub company_id: CompanyId,
    pub contact_id: ContactId,
    pub user_id: Option<UserId>,
    pub body: MessageBody,
    pub send_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
    pub status: ScheduleStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Schedule {
    pub fn is_sent(&self) -> bool {
        self.sent_at.is_some() || self.status == ScheduleStatus::Sent
    }
}

#[derive(Clone, Debug)]
pub struct NewSchedule {
    pub company_id: CompanyId,
    pub contact_id: ContactId,
    pub user_id: Option<UserId>,
    pub body: MessageBody,
    pub send_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct UpdateSchedule {
    pub contact_id: ContactId,
    pub body: MessageBody,
    pub send_at: NaiveDateTime,
}
