//! Diesel models for company settings and campaign settings.

use diesel::prelude::*;

use crate::domain::setting::{CampaignSetting as DomainCampaignSetting, Setting as DomainSetting};
use crate::domain::types::{CompanyId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::settings)]
pub struct Setting {
    pub id: i32,
    pub company_id: i32,
    pub key: String,
    pub value: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::settings)]
pub struct NewSetting<'a> {
    pub company_id: i32,
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::campaign_settings)]
pub struct CampaignSetting {
    pub id: i32,
    pub company_id: i32,
    pub key: String,
    pub value: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaign_settings)]
pub struct NewCampaignSetting<'a> {
    pub company_id: i32,
    pub key: &'a str,
    pub value: &'a str,
}

impl TryFrom<Setting> for DomainSetting {
    type Error = TypeConstraintError;

    fn try_from(setting: Setting) -> Result<Self, Self::Error> {
        Ok(Self {
            company_id: CompanyId::try_from(setting.company_id)?,
            key: setting.key,
            value: setting.value,
        })
    }
}

impl TryFrom<CampaignSetting> for DomainCampaignSetting {
    type Error = TypeConstraintError;

    fn try_from(setting: CampaignSetting) -> Result<Self, Self::Error> {
        Ok(Self {
            company_id: CompanyId::try_from(setting.company_id)?,
            key: setting.key,
            value: setting.value,
        })
    }
}
