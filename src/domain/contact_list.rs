//! Static contact lists used as campaign audiences.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyId, ContactEmail, ContactListId, ContactListItemId, ContactListName, ContactName,
    PhoneNumber,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactList {
    pub id: ContactListId,
    pub company_id: CompanyId,
    pub name: ContactListName,
    /// Number of items on the list, computed on read.
    pub contacts_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Name-only view embedded in campaigns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactListSummary {
    pub id: ContactListId,
    pub name: ContactListName,
}

impl From<&ContactList> for ContactListSummary {
    fn from(list: &ContactList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewContactList {
    pub company_id: CompanyId,
    pub name: ContactListName,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactListItem {
    pub id: ContactListItemId,
    pub company_id: CompanyId,
    pub contact_list_id: ContactListId,
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewContactListItem {
    pub company_id: CompanyId,
    pub contact_list_id: ContactListId,
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
}

#[derive(Clone, Debug)]
pub struct UpdateContactListItem {
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
}
