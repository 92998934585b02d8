use serde::Deserialize;
use validator::Validate;

use crate::domain::campaign::{NewCampaign, UpdateCampaign};
use crate::domain::types::{CampaignName, CompanyId, ContactListId, MessageBody};
use crate::forms::{FormError, non_blank, parse_datetime};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub contact_list_id: Option<i32>,
    #[serde(default)]
    pub whatsapp_id: Option<i32>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub confirmation: bool,
}

pub struct CampaignPayload {
    pub name: CampaignName,
    pub message: MessageBody,
    pub contact_list_id: Option<ContactListId>,
    pub whatsapp_id: Option<i32>,
    pub scheduled_at: Option<chrono::NaiveDateTime>,
    pub confirmation: bool,
}

impl TryFrom<CampaignForm> for CampaignPayload {
    type Error = FormError;

    fn try_from(form: CampaignForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let scheduled_at = non_blank(form.scheduled_at)
            .map(|v| parse_datetime(&v))
            .transpose()?;
        let contact_list_id = form
            .contact_list_id
            .map(|id| ContactListId::new(id).map_err(|_| FormError::InvalidId))
            .transpose()?;

        Ok(Self {
            name: CampaignName::new(form.name).map_err(|_| FormError::InvalidName)?,
            message: MessageBody::new(form.message).map_err(|_| FormError::InvalidMessage)?,
            contact_list_id,
            whatsapp_id: form.whatsapp_id,
            scheduled_at,
            confirmation: form.confirmation,
        })
    }
}

impl CampaignPayload {
    pub fn into_new(self, company_id: CompanyId) -> NewCampaign {
        NewCampaign {
            company_id,
            name: self.name,
            message: self.message,
            contact_list_id: self.contact_list_id,
            whatsapp_id: self.whatsapp_id,
            scheduled_at: self.scheduled_at,
            confirmation: self.confirmation,
        }
    }

    pub fn into_update(self) -> UpdateCampaign {
        UpdateCampaign {
            name: self.name,
            message: self.message,
            contact_list_id: self.contact_list_id,
            whatsapp_id: self.whatsapp_id,
            scheduled_at: self.scheduled_at,
            confirmation: self.confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CampaignStatus;

    fn form(scheduled_at: Option<&str>) -> CampaignForm {
        CampaignForm {
            name: "Promo".into(),
            message: "Hello {{name}}".into(),
            contact_list_id: Some(3),
            whatsapp_id: None,
            scheduled_at: scheduled_at.map(str::to_string),
            confirmation: false,
        }
    }

    #[test]
    fn scheduled_campaign_starts_programmed() {
        let campaign = CampaignPayload::try_from(form(Some("2030-01-01T09:00:00Z")))
            .unwrap()
            .into_new(CompanyId::new(1).unwrap());
        assert_eq!(campaign.initial_status(), CampaignStatus::Scheduled);
    }

    #[test]
    fn blank_schedule_is_unscheduled() {
        let campaign = CampaignPayload::try_from(form(Some("")))
            .unwrap()
            .into_new(CompanyId::new(1).unwrap());
        assert_eq!(campaign.initial_status(), CampaignStatus::Inactive);
    }

    #[test]
    fn zero_contact_list_is_rejected() {
        let mut form = form(None);
        form.contact_list_id = Some(0);
        assert!(matches!(
            CampaignPayload::try_from(form),
            Err(FormError::InvalidId)
        ));
    }

    #[test]
    fn bad_schedule_is_rejected() {
        assert!(matches!(
            CampaignPayload::try_from(form(Some("soon"))),
            Err(FormError::InvalidDate)
        ));
    }
}
