//! Diesel models for contacts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact,
    UpdateContact as DomainUpdateContact,
};
use crate::domain::types::{
    CompanyId, ContactChannel, ContactEmail, ContactId, ContactName, PhoneNumber,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub number: String,
    pub email: Option<String>,
    pub is_group: bool,
    pub active: bool,
    pub channel: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct NewContact<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub number: &'a str,
    pub email: Option<&'a str>,
    pub is_group: bool,
    pub channel: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateContact<'a> {
    pub name: &'a str,
    pub number: &'a str,
    pub email: Option<&'a str>,
    pub channel: &'a str,
    pub updated_at: NaiveDateTime,
}

/// Converts a row without tags; callers attach tags afterwards.
impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::try_from(contact.id)?,
            company_id: CompanyId::try_from(contact.company_id)?,
            name: ContactName::new(contact.name)?,
            number: PhoneNumber::new(contact.number)?,
            email: contact.email.map(ContactEmail::new).transpose()?,
            is_group: contact.is_group,
            active: contact.active,
            channel: contact.channel.parse::<ContactChannel>()?,
            tags: Vec::new(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            company_id: contact.company_id.get(),
            name: contact.name.as_str(),
            number: contact.number.as_str(),
            email: contact.email.as_ref().map(|e| e.as_str()),
            is_group: contact.is_group,
            channel: contact.channel.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateContact> for UpdateContact<'a> {
    fn from(contact: &'a DomainUpdateContact) -> Self {
        Self {
            name: contact.name.as_str(),
            number: contact.number.as_str(),
            email: contact.email.as_ref().map(|e| e.as_str()),
            channel: contact.channel.as_str(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
