//! Diesel models for quick messages.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::quick_message::{
    NewQuickMessage as DomainNewQuickMessage, QuickMessage as DomainQuickMessage,
    UpdateQuickMessage as DomainUpdateQuickMessage,
};
use crate::domain::types::{
    CompanyId, MessageBody, QuickMessageId, Shortcode, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::quick_messages)]
pub struct QuickMessage {
    pub id: i32,
    pub company_id: i32,
    pub user_id: i32,
    pub shortcode: String,
    pub message: String,
    pub geral: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quick_messages)]
pub struct NewQuickMessage<'a> {
    pub company_id: i32,
    pub user_id: i32,
    pub shortcode: &'a str,
    pub message: &'a str,
    pub geral: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quick_messages)]
pub struct UpdateQuickMessage<'a> {
    pub shortcode: &'a str,
    pub message: &'a str,
    pub geral: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<QuickMessage> for DomainQuickMessage {
    type Error = TypeConstraintError;

    fn try_from(record: QuickMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuickMessageId::try_from(record.id)?,
            company_id: CompanyId::try_from(record.company_id)?,
            user_id: UserId::try_from(record.user_id)?,
            shortcode: Shortcode::new(record.shortcode)?,
            message: MessageBody::new(record.message)?,
            geral: record.geral,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewQuickMessage> for NewQuickMessage<'a> {
    fn from(record: &'a DomainNewQuickMessage) -> Self {
        Self {
            company_id: record.company_id.get(),
            user_id: record.user_id.get(),
            shortcode: record.shortcode.as_str(),
            message: record.message.as_str(),
            geral: record.geral,
        }
    }
}

impl<'a> From<&'a DomainUpdateQuickMessage> for UpdateQuickMessage<'a> {
    fn from(record: &'a DomainUpdateQuickMessage) -> Self {
        Self {
            shortcode: record.shortcode.as_str(),
            message: record.message.as_str(),
            geral: record.geral,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
