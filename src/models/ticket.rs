//! Diesel models for tickets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ticket::{
    NewTicket as DomainNewTicket, Ticket as DomainTicket, UpdateTicket as DomainUpdateTicket,
};
use crate::domain::types::{CompanyId, ContactId, TicketId, TicketStatus, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tickets)]
/// Diesel model for [`crate::domain::ticket::Ticket`].
pub struct Ticket {
    pub id: i32,
    pub company_id: i32,
    pub contact_id: i32,
    pub user_id: Option<i32>,
    pub status: String,
    pub last_message: String,
    pub unread_messages: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tickets)]
pub struct NewTicket<'a> {
    pub company_id: i32,
    pub contact_id: i32,
    pub user_id: Option<i32>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tickets)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTicket<'a> {
    pub status: &'a str,
    pub user_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Ticket> for DomainTicket {
    type Error = TypeConstraintError;

    fn try_from(ticket: Ticket) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TicketId::try_from(ticket.id)?,
            company_id: CompanyId::try_from(ticket.company_id)?,
            contact_id: ContactId::try_from(ticket.contact_id)?,
            user_id: ticket.user_id.map(UserId::try_from).transpose()?,
            status: ticket.status.parse::<TicketStatus>()?,
            last_message: ticket.last_message,
            unread_messages: ticket.unread_messages,
            tags: Vec::new(),
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTicket> for NewTicket<'a> {
    fn from(ticket: &'a DomainNewTicket) -> Self {
        Self {
            company_id: ticket.company_id.get(),
            contact_id: ticket.contact_id.get(),
            user_id: ticket.user_id.map(UserId::get),
            status: ticket.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTicket> for UpdateTicket<'a> {
    fn from(ticket: &'a DomainUpdateTicket) -> Self {
        Self {
            status: ticket.status.as_str(),
            user_id: ticket.user_id.map(UserId::get),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
