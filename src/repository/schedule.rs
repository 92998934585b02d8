//! Repository implementation for scheduled messages.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        schedule::{NewSchedule, Schedule, UpdateSchedule},
        types::{CompanyId, ScheduleId},
    },
    models::schedule::{
        NewSchedule as DbNewSchedule, Schedule as DbSchedule, UpdateSchedule as DbUpdateSchedule,
    },
    repository::{
        DieselRepository, ScheduleListQuery, ScheduleReader, ScheduleWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::schedules,
};

fn filtered_schedules(query: &ScheduleListQuery) -> schedules::BoxedQuery<'static, Sqlite> {
    let mut items = schedules::table
        .filter(schedules::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(contact_id) = query.contact_id {
        items = items.filter(schedules::contact_id.eq(contact_id.get()));
    }
    if let Some(search) = &query.search {
        items = items.filter(schedules::body.like(format!("%{search}%")));
    }

    items
}

impl ScheduleReader for DieselRepository {
    fn get_schedule_by_id(
        &self,
        id: ScheduleId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Schedule>> {
        let mut conn = self.conn()?;
        let db_schedule = schedules::table
            .filter(schedules::id.eq(id.get()))
            .filter(schedules::company_id.eq(company_id.get()))
            .first::<DbSchedule>(&mut conn)
            .optional()?;

        db_schedule
            .map(|s| Schedule::try_from(s).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_schedules(&self, query: ScheduleListQuery) -> RepositoryResult<(usize, Vec<Schedule>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_schedules(&query).count().get_result(&mut conn)?;

        let mut items =
            filtered_schedules(&query).order((schedules::send_at.asc(), schedules::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let schedules = items
            .load::<DbSchedule>(&mut conn)?
            .into_iter()
            .map(|s| Schedule::try_from(s).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, schedules))
    }
}

impl ScheduleWriter for DieselRepository {
    fn create_schedule(&self, new_schedule: &NewSchedule) -> RepositoryResult<Schedule> {
        let mut conn = self.conn()?;
        let db_new_schedule: DbNewSchedule = new_schedule.into();

        let db_schedule = diesel::insert_into(schedules::table)
            .values(&db_new_schedule)
            .get_result::<DbSchedule>(&mut conn)?;

        Schedule::try_from(db_schedule).map_err(RepositoryError::from)
    }

    fn update_schedule(
        &self,
        id: ScheduleId,
        updates: &UpdateSchedule,
    ) -> RepositoryResult<Schedule> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateSchedule = updates.into();

        let db_schedule = diesel::update(schedules::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbSchedule>(&mut conn)?;

        Schedule::try_from(db_schedule).map_err(RepositoryError::from)
    }

    fn delete_schedule(&self, id: ScheduleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(schedules::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
