//! Campaign aggregate and its status lifecycle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::contact_list::ContactListSummary;
use crate::domain::types::{
    CampaignId, CampaignName, CampaignStatus, CompanyId, ContactListId, MessageBody,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub company_id: CompanyId,
    pub name: CampaignName,
    pub message: MessageBody,
    pub status: CampaignStatus,
    /// Audience: the items of this contact list.
    pub contact_list_id: Option<ContactListId>,
    pub contact_list: Option<ContactListSummary>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub confirmation: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewCampaign {
    pub company_id: CompanyId,
    pub name: CampaignName,
    pub message: MessageBody,
    pub contact_list_id: Option<ContactListId>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub confirmation: bool,
}

impl NewCampaign {
    /// Campaigns with a schedule start as `PROGRAMADA`, the rest as `INATIVA`.
    pub fn initial_status(&self) -> CampaignStatus {
        CampaignStatus::for_schedule(self.scheduled_at)
    }
}

#[derive(Clone, Debug)]
pub struct UpdateCampaign {
    pub name: CampaignName,
    pub message: MessageBody,
    pub contact_list_id: Option<ContactListId>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub confirmation: bool,
}

impl UpdateCampaign {
    pub fn status(&self) -> CampaignStatus {
        CampaignStatus::for_schedule(self.scheduled_at)
    }
}

impl CampaignStatus {
    fn for_schedule(scheduled_at: Option<NaiveDateTime>) -> Self {
        if scheduled_at.is_some() {
            CampaignStatus::Scheduled
        } else {
            CampaignStatus::Inactive
        }
    }

    /// Status after a cancel request, if cancelling is allowed.
    pub fn cancelled(self) -> Option<Self> {
        match self {
            CampaignStatus::InProgress | CampaignStatus::Scheduled => {
                Some(CampaignStatus::Cancelled)
            }
            _ => None,
        }
    }

    /// Status after a restart request, if restarting is allowed.
    pub fn restarted(self) -> Option<Self> {
        match self {
            CampaignStatus::Cancelled => Some(CampaignStatus::InProgress),
            _ => None,
        }
    }

    pub fn is_editable(self) -> bool {
        self != CampaignStatus::InProgress
    }
}
