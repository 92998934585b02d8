//! Repository implementation for company and campaign settings.

use diesel::{Connection, prelude::*, upsert::excluded};

use crate::{
    domain::{
        setting::{CampaignSetting, Setting},
        types::CompanyId,
    },
    models::setting::{
        CampaignSetting as DbCampaignSetting, NewCampaignSetting as DbNewCampaignSetting,
        NewSetting as DbNewSetting, Setting as DbSetting,
    },
    repository::{
        DieselRepository, SettingReader, SettingWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{campaign_settings, settings},
};

impl SettingReader for DieselRepository {
    fn get_setting(&self, company_id: CompanyId, key: &str) -> RepositoryResult<Option<Setting>> {
        let mut conn = self.conn()?;
        let db_setting = settings::table
            .filter(settings::company_id.eq(company_id.get()))
            .filter(settings::key.eq(key))
            .first::<DbSetting>(&mut conn)
            .optional()?;

        db_setting
            .map(|s| Setting::try_from(s).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_settings(&self, company_id: CompanyId) -> RepositoryResult<Vec<Setting>> {
        let mut conn = self.conn()?;
        settings::table
            .filter(settings::company_id.eq(company_id.get()))
            .order(settings::key.asc())
            .load::<DbSetting>(&mut conn)?
            .into_iter()
            .map(|s| Setting::try_from(s).map_err(RepositoryError::from))
            .collect()
    }

    fn list_campaign_settings(
        &self,
        company_id: CompanyId,
    ) -> RepositoryResult<Vec<CampaignSetting>> {
        let mut conn = self.conn()?;
        campaign_settings::table
            .filter(campaign_settings::company_id.eq(company_id.get()))
            .order(campaign_settings::key.asc())
            .load::<DbCampaignSetting>(&mut conn)?
            .into_iter()
            .map(|s| CampaignSetting::try_from(s).map_err(RepositoryError::from))
            .collect()
    }
}

impl SettingWriter for DieselRepository {
    fn upsert_setting(
        &self,
        company_id: CompanyId,
        key: &str,
        value: &str,
    ) -> RepositoryResult<Setting> {
        let mut conn = self.conn()?;
        let db_new_setting = DbNewSetting {
            company_id: company_id.get(),
            key,
            value,
        };

        let db_setting = diesel::insert_into(settings::table)
            .values(&db_new_setting)
            .on_conflict((settings::company_id, settings::key))
            .do_update()
            .set(settings::value.eq(excluded(settings::value)))
            .get_result::<DbSetting>(&mut conn)?;

        Setting::try_from(db_setting).map_err(RepositoryError::from)
    }

    fn upsert_campaign_settings(
        &self,
        company_id: CompanyId,
        values: &[(String, String)],
    ) -> RepositoryResult<Vec<CampaignSetting>> {
        let mut conn = self.conn()?;

        let db_settings = conn.transaction::<Vec<DbCampaignSetting>, diesel::result::Error, _>(
            |conn| {
                values
                    .iter()
                    .map(|(key, value)| {
                        diesel::insert_into(campaign_settings::table)
                            .values(&DbNewCampaignSetting {
                                company_id: company_id.get(),
                                key,
                                value,
                            })
                            .on_conflict((campaign_settings::company_id, campaign_settings::key))
                            .do_update()
                            .set(campaign_settings::value.eq(excluded(campaign_settings::value)))
                            .get_result::<DbCampaignSetting>(conn)
                    })
                    .collect()
            },
        )?;

        db_settings
            .into_iter()
            .map(|s| CampaignSetting::try_from(s).map_err(RepositoryError::from))
            .collect()
    }
}
