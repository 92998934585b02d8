//! Diesel models for campaigns.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::campaign::{
    Campaign as DomainCampaign, NewCampaign as DomainNewCampaign,
    UpdateCampaign as DomainUpdateCampaign,
};
use crate::domain::types::{
    CampaignId, CampaignName, CampaignStatus, CompanyId, ContactListId, MessageBody,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::campaigns)]
/// Diesel model for [`crate::domain::campaign::Campaign`].
pub struct Campaign {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub message: String,
    pub status: String,
    pub contact_list_id: Option<i32>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub confirmation: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct NewCampaign<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub message: &'a str,
    pub status: &'a str,
    pub contact_list_id: Option<i32>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub confirmation: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCampaign<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub status: &'a str,
    pub contact_list_id: Option<i32>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub confirmation: bool,
    pub updated_at: NaiveDateTime,
}

/// Converts a row without the list summary; callers attach it afterwards.
impl TryFrom<Campaign> for DomainCampaign {
    type Error = TypeConstraintError;

    fn try_from(campaign: Campaign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CampaignId::try_from(campaign.id)?,
            company_id: CompanyId::try_from(campaign.company_id)?,
            name: CampaignName::new(campaign.name)?,
            message: MessageBody::new(campaign.message)?,
            status: campaign.status.parse::<CampaignStatus>()?,
            contact_list_id: campaign
                .contact_list_id
                .map(ContactListId::try_from)
                .transpose()?,
            contact_list: None,
            whatsapp_id: campaign.whatsapp_id,
            scheduled_at: campaign.scheduled_at,
            completed_at: campaign.completed_at,
            confirmation: campaign.confirmation,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCampaign> for NewCampaign<'a> {
    fn from(campaign: &'a DomainNewCampaign) -> Self {
        Self {
            company_id: campaign.company_id.get(),
            name: campaign.name.as_str(),
            message: campaign.message.as_str(),
            status: campaign.initial_status().as_str(),
            contact_list_id: campaign.contact_list_id.map(ContactListId::get),
            whatsapp_id: campaign.whatsapp_id,
            scheduled_at: campaign.scheduled_at,
            confirmation: campaign.confirmation,
        }
    }
}

impl<'a> From<&'a DomainUpdateCampaign> for UpdateCampaign<'a> {
    fn from(campaign: &'a DomainUpdateCampaign) -> Self {
        Self {
            name: campaign.name.as_str(),
            message: campaign.message.as_str(),
            status: campaign.status().as_str(),
            contact_list_id: campaign.contact_list_id.map(ContactListId::get),
            whatsapp_id: campaign.whatsapp_id,
            scheduled_at: campaign.scheduled_at,
            confirmation: campaign.confirmation,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
