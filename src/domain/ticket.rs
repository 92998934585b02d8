use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::domain::types::{CompanyId, ContactId, TicketId, TicketStatus, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub company_id: CompanyId,
    pub contact_id: ContactId,
    pub user_id: Option<UserId>,
    pub status: TicketStatus,
    pub last_message: String,
    pub unread_messages: i32,
    pub tags: Vec<Tag>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Ticket {
    /// Whether the given user may see the ticket without the `all_ticket` permission.
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.user_id.is_none_or(|owner| owner == user_id)
    }
}

#[derive(Clone, Debug)]
pub struct NewTicket {
    pub company_id: CompanyId,
    pub contact_id: ContactId,
    pub user_id: Option<UserId>,
    pub status: TicketStatus,
}

#[derive(Clone, Debug)]
pub struct UpdateTicket {
    pub status: TicketStatus,
    pub user_id: Option<UserId>,
}
