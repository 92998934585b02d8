use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::domain::types::{
    CompanyId, ContactChannel, ContactEmail, ContactId, ContactName, PhoneNumber,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub company_id: CompanyId,
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
    pub is_group: bool,
    /// `false` once the contact has been blocked.
    pub active: bool,
    pub channel: ContactChannel,
    pub tags: Vec<Tag>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewContact {
    pub company_id: CompanyId,
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
    pub is_group: bool,
    pub channel: ContactChannel,
}

#[derive(Clone, Debug)]
pub struct UpdateContact {
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
    pub channel: ContactChannel,
}
