use serde::{Deserialize, Deserializer};

use crate::domain::types::{ContactId, TicketStatus, UserId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketForm {
    pub contact_id: i32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<i32>,
}

pub struct NewTicketPayload {
    pub contact_id: ContactId,
    pub status: TicketStatus,
    pub user_id: Option<UserId>,
}

impl TryFrom<NewTicketForm> for NewTicketPayload {
    type Error = FormError;

    fn try_from(form: NewTicketForm) -> Result<Self, Self::Error> {
        Ok(Self {
            contact_id: ContactId::new(form.contact_id).map_err(|_| FormError::InvalidId)?,
            status: parse_status(form.status)?.unwrap_or(TicketStatus::Pending),
            user_id: parse_user(form.user_id)?,
        })
    }
}

/// Absent fields keep their value; `userId: null` unassigns the ticket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketForm {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub user_id: Option<Option<i32>>,
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

pub struct UpdateTicketPayload {
    pub status: Option<TicketStatus>,
    pub user_id: Option<Option<UserId>>,
}

impl TryFrom<UpdateTicketForm> for UpdateTicketPayload {
    type Error = FormError;

    fn try_from(form: UpdateTicketForm) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_status(form.status)?,
            user_id: form.user_id.map(parse_user).transpose()?,
        })
    }
}

fn parse_status(status: Option<String>) -> Result<Option<TicketStatus>, FormError> {
    non_blank(status)
        .map(|s| s.parse().map_err(|_| FormError::InvalidStatus))
        .transpose()
}

fn parse_user(user_id: Option<i32>) -> Result<Option<UserId>, FormError> {
    user_id
        .map(|id| UserId::new(id).map_err(|_| FormError::InvalidId))
        .transpose()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListParams {
    pub search_param: Option<String>,
    pub page_number: Option<usize>,
    pub status: Option<String>,
    #[serde(default)]
    pub show_all: bool,
}

impl TicketListParams {
    pub fn status(&self) -> Result<Option<TicketStatus>, FormError> {
        parse_status(self.status.clone())
    }
}
