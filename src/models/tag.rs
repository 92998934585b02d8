//! Diesel models for tags and their contact/ticket links.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};
use crate::domain::types::{CompanyId, HexColor, TagId, TagName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
/// Diesel model for [`crate::domain::tag::Tag`].
pub struct Tag {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub color: String,
    pub kanban: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub color: &'a str,
    pub kanban: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct UpdateTag<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub kanban: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_tags)]
pub struct NewContactTag {
    pub contact_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ticket_tags)]
pub struct NewTicketTag {
    pub ticket_id: i32,
    pub tag_id: i32,
}

impl TryFrom<Tag> for DomainTag {
    type Error = TypeConstraintError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TagId::try_from(tag.id)?,
            company_id: CompanyId::try_from(tag.company_id)?,
            name: TagName::new(tag.name)?,
            color: HexColor::new(tag.color)?,
            kanban: tag.kanban,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTag> for NewTag<'a> {
    fn from(tag: &'a DomainNewTag) -> Self {
        Self {
            company_id: tag.company_id.get(),
            name: tag.name.as_str(),
            color: tag.color.as_str(),
            kanban: tag.kanban,
        }
    }
}

impl<'a> From<&'a DomainUpdateTag> for UpdateTag<'a> {
    fn from(tag: &'a DomainUpdateTag) -> Self {
        Self {
            name: tag.name.as_str(),
            color: tag.color.as_str(),
            kanban: tag.kanban,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
