//! Company-scoped key/value settings.

use serde::{Deserialize, Serialize};

use crate::domain::types::CompanyId;

/// Platform setting controlling public signup.
pub const USER_CREATION_KEY: &str = "userCreation";
pub const SETTING_DISABLED: &str = "disabled";

/// Keys accepted by the campaign settings endpoint.
pub const CAMPAIGN_SETTING_KEYS: [&str; 4] = [
    "messageInterval",
    "longerIntervalAfter",
    "greaterInterval",
    "variables",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub company_id: CompanyId,
    pub key: String,
    pub value: String,
}

impl Setting {
    pub fn is_disabled(&self) -> bool {
        self.value == SETTING_DISABLED
    }
}

/// Campaign pacing value; `value` holds JSON text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSetting {
    pub company_id: CompanyId,
    pub key: String,
    pub value: String,
}
