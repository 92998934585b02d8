//! Company settings and campaign pacing values.

use crate::auth::AuthenticatedUser;
use crate::domain::setting::{CampaignSetting, Setting};
use crate::forms::settings::{CampaignSettingsForm, SettingForm};
use crate::forms::FormError;
use crate::repository::{SettingReader, SettingWriter};
use crate::services::{ServiceResult, ensure_admin, log_repo_error};

pub fn list_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Setting>>
where
    R: SettingReader + ?Sized,
{
    ensure_admin(user)?;

    repo.list_settings(user.company_id()?)
        .map_err(log_repo_error("Failed to list settings"))
}

pub fn update_setting<R>(
    repo: &R,
    user: &AuthenticatedUser,
    key: &str,
    form: SettingForm,
) -> ServiceResult<Setting>
where
    R: SettingWriter + ?Sized,
{
    ensure_admin(user)?;

    let key = key.trim();
    if key.is_empty() {
        return Err(FormError::InvalidSetting.into());
    }

    repo.upsert_setting(user.company_id()?, key, form.value.trim())
        .map_err(log_repo_error("Failed to update setting"))
}

pub fn list_campaign_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<CampaignSetting>>
where
    R: SettingReader + ?Sized,
{
    ensure_admin(user)?;

    repo.list_campaign_settings(user.company_id()?)
        .map_err(log_repo_error("Failed to list campaign settings"))
}

pub fn save_campaign_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CampaignSettingsForm,
) -> ServiceResult<Vec<CampaignSetting>>
where
    R: SettingWriter + ?Sized,
{
    ensure_admin(user)?;

    let values = form.into_pairs()?;

    repo.upsert_campaign_settings(user.company_id()?, &values)
        .map_err(log_repo_error("Failed to save campaign settings"))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::*;

    #[test]
    fn agents_cannot_read_settings() {
        let repo = MockRepository::new();
        assert!(matches!(
            list_settings(&repo, &agent()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn setting_is_upserted_in_requesters_company() {
        let mut repo = MockRepository::new();
        repo.expect_upsert_setting()
            .withf(|company_id, key, value| company_id.get() == 7 && key == "userCreation" && value == "disabled")
            .returning(|company_id, key, value| {
                Ok(Setting {
                    company_id,
                    key: key.to_string(),
                    value: value.to_string(),
                })
            });

        let setting = update_setting(
            &repo,
            &admin(),
            "userCreation",
            SettingForm {
                value: " disabled ".into(),
            },
        )
        .unwrap();

        assert!(setting.is_disabled());
    }
}
