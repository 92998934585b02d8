//! Bodies of the settings endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::setting::CAMPAIGN_SETTING_KEYS;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct SettingForm {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CampaignSettingsForm {
    pub settings: BTreeMap<String, Value>,
}

impl CampaignSettingsForm {
    /// Known keys paired with their JSON-encoded values.
    pub fn into_pairs(self) -> Result<Vec<(String, String)>, FormError> {
        self.settings
            .into_iter()
            .map(|(key, value)| {
                if !CAMPAIGN_SETTING_KEYS.contains(&key.as_str()) {
                    return Err(FormError::InvalidSetting);
                }
                let encoded = serde_json::to_string(&value).map_err(|_| FormError::InvalidSetting)?;
                Ok((key, encoded))
            })
            .collect()
    }
}
