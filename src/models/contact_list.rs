//! Diesel models for contact lists and their items.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact_list::{
    ContactList as DomainContactList, ContactListItem as DomainContactListItem,
    NewContactList as DomainNewContactList, NewContactListItem as DomainNewContactListItem,
    UpdateContactListItem as DomainUpdateContactListItem,
};
use crate::domain::types::{
    CompanyId, ContactEmail, ContactListId, ContactListItemId, ContactListName, ContactName,
    PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contact_lists)]
pub struct ContactList {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_lists)]
pub struct NewContactList<'a> {
    pub company_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contact_list_items)]
pub struct ContactListItem {
    pub id: i32,
    pub company_id: i32,
    pub contact_list_id: i32,
    pub name: String,
    pub number: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_list_items)]
pub struct NewContactListItem<'a> {
    pub company_id: i32,
    pub contact_list_id: i32,
    pub name: &'a str,
    pub number: &'a str,
    pub email: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contact_list_items)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateContactListItem<'a> {
    pub name: &'a str,
    pub number: &'a str,
    pub email: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Converts a row with a zero count; callers fill `contacts_count` afterwards.
impl TryFrom<ContactList> for DomainContactList {
    type Error = TypeConstraintError;

    fn try_from(list: ContactList) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactListId::try_from(list.id)?,
            company_id: CompanyId::try_from(list.company_id)?,
            name: ContactListName::new(list.name)?,
            contacts_count: 0,
            created_at: list.created_at,
            updated_at: list.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewContactList> for NewContactList<'a> {
    fn from(list: &'a DomainNewContactList) -> Self {
        Self {
            company_id: list.company_id.get(),
            name: list.name.as_str(),
        }
    }
}

impl TryFrom<ContactListItem> for DomainContactListItem {
    type Error = TypeConstraintError;

    fn try_from(item: ContactListItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactListItemId::try_from(item.id)?,
            company_id: CompanyId::try_from(item.company_id)?,
            contact_list_id: ContactListId::try_from(item.contact_list_id)?,
            name: ContactName::new(item.name)?,
            number: PhoneNumber::new(item.number)?,
            email: item.email.map(ContactEmail::new).transpose()?,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewContactListItem> for NewContactListItem<'a> {
    fn from(item: &'a DomainNewContactListItem) -> Self {
        Self {
            company_id: item.company_id.get(),
            contact_list_id: item.contact_list_id.get(),
            name: item.name.as_str(),
            number: item.number.as_str(),
            email: item.email.as_ref().map(|e| e.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateContactListItem> for UpdateContactListItem<'a> {
    fn from(item: &'a DomainUpdateContactListItem) -> Self {
        Self {
            name: item.name.as_str(),
            number: item.number.as_str(),
            email: item.email.as_ref().map(|e| e.as_str()),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
