//! Repository implementation for campaigns.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::{
        campaign::{Campaign, NewCampaign, UpdateCampaign},
        types::{CampaignId, CampaignStatus, CompanyId},
    },
    models::campaign::{
        Campaign as DbCampaign, NewCampaign as DbNewCampaign, UpdateCampaign as DbUpdateCampaign,
    },
    repository::{
        CampaignListQuery, CampaignReader, CampaignWriter, DieselRepository,
        contact_list::summaries_for_lists,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::campaigns,
};

fn filtered_campaigns(query: &CampaignListQuery) -> campaigns::BoxedQuery<'static, Sqlite> {
    let mut items = campaigns::table
        .filter(campaigns::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        items = items.filter(campaigns::name.like(format!("%{search}%")));
    }

    items
}

/// Converts rows into domain campaigns with their contact list summary attached.
fn with_lists(
    conn: &mut SqliteConnection,
    db_campaigns: Vec<DbCampaign>,
) -> RepositoryResult<Vec<Campaign>> {
    let ids = db_campaigns
        .iter()
        .filter_map(|c| c.contact_list_id)
        .collect::<Vec<_>>();
    let summaries = summaries_for_lists(conn, &ids)?;

    db_campaigns
        .into_iter()
        .map(|db_campaign| {
            let list_id = db_campaign.contact_list_id;
            let mut campaign = Campaign::try_from(db_campaign).map_err(RepositoryError::from)?;
            campaign.contact_list = list_id.and_then(|id| summaries.get(&id).cloned());
            Ok(campaign)
        })
        .collect()
}

fn single_with_list(
    conn: &mut SqliteConnection,
    db_campaign: DbCampaign,
) -> RepositoryResult<Campaign> {
    with_lists(conn, vec![db_campaign])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(
        &self,
        id: CampaignId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Campaign>> {
        let mut conn = self.conn()?;
        let db_campaign = campaigns::table
            .filter(campaigns::id.eq(id.get()))
            .filter(campaigns::company_id.eq(company_id.get()))
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        db_campaign
            .map(|c| single_with_list(&mut conn, c))
            .transpose()
    }

    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<(usize, Vec<Campaign>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_campaigns(&query).count().get_result(&mut conn)?;

        let mut items = filtered_campaigns(&query).order(campaigns::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let db_campaigns = items.load::<DbCampaign>(&mut conn)?;
        let campaigns = with_lists(&mut conn, db_campaigns)?;

        Ok((total as usize, campaigns))
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        let mut conn = self.conn()?;
        let db_new_campaign: DbNewCampaign = new_campaign.into();

        let db_campaign = diesel::insert_into(campaigns::table)
            .values(&db_new_campaign)
            .get_result::<DbCampaign>(&mut conn)?;

        single_with_list(&mut conn, db_campaign)
    }

    fn update_campaign(
        &self,
        id: CampaignId,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateCampaign = updates.into();

        let db_campaign = diesel::update(campaigns::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbCampaign>(&mut conn)?;

        single_with_list(&mut conn, db_campaign)
    }

    fn set_campaign_status(
        &self,
        id: CampaignId,
        status: CampaignStatus,
    ) -> RepositoryResult<Campaign> {
        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();
        let completed_at = (status == CampaignStatus::Finished).then_some(now);

        let db_campaign = diesel::update(campaigns::table.find(id.get()))
            .set((
                campaigns::status.eq(status.as_str()),
                campaigns::completed_at.eq(completed_at),
                campaigns::updated_at.eq(now),
            ))
            .get_result::<DbCampaign>(&mut conn)?;

        single_with_list(&mut conn, db_campaign)
    }

    fn delete_campaign(&self, id: CampaignId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(campaigns::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
