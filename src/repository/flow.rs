//! Repository implementation for flow builder records.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        flow::{Flow, NewFlow, UpdateFlow},
        types::{CompanyId, FlowId},
    },
    models::flow::{Flow as DbFlow, NewFlow as DbNewFlow, UpdateFlow as DbUpdateFlow},
    repository::{
        DieselRepository, FlowListQuery, FlowReader, FlowWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::flows,
};

fn filtered_flows(query: &FlowListQuery) -> flows::BoxedQuery<'static, Sqlite> {
    let mut items = flows::table
        .filter(flows::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        items = items.filter(flows::name.like(format!("%{search}%")));
    }

    items
}

impl FlowReader for DieselRepository {
    fn get_flow_by_id(&self, id: FlowId, company_id: CompanyId) -> RepositoryResult<Option<Flow>> {
        let mut conn = self.conn()?;
        let record = flows::table
            .filter(flows::id.eq(id.get()))
            .filter(flows::company_id.eq(company_id.get()))
            .first::<DbFlow>(&mut conn)
            .optional()?;

        record
            .map(|r| Flow::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_flows(&self, query: FlowListQuery) -> RepositoryResult<(usize, Vec<Flow>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_flows(&query).count().get_result(&mut conn)?;

        let mut items = filtered_flows(&query).order((flows::name.asc(), flows::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let records = items
            .load::<DbFlow>(&mut conn)?
            .into_iter()
            .map(|r| Flow::try_from(r).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, records))
    }
}

impl FlowWriter for DieselRepository {
    fn create_flow(&self, new_flow: &NewFlow) -> RepositoryResult<Flow> {
        let mut conn = self.conn()?;
        let db_new_flow: DbNewFlow = new_flow.into();

        let record = diesel::insert_into(flows::table)
            .values(&db_new_flow)
            .get_result::<DbFlow>(&mut conn)?;

        Flow::try_from(record).map_err(RepositoryError::from)
    }

    fn update_flow(&self, id: FlowId, updates: &UpdateFlow) -> RepositoryResult<Flow> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateFlow = updates.into();

        let record = diesel::update(flows::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbFlow>(&mut conn)?;

        Flow::try_from(record).map_err(RepositoryError::from)
    }

    fn save_flow_graph(&self, id: FlowId, graph: &serde_json::Value) -> RepositoryResult<Flow> {
        let mut conn = self.conn()?;
        let record = diesel::update(flows::table.find(id.get()))
            .set((
                flows::flow.eq(Some(graph.to_string())),
                flows::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbFlow>(&mut conn)?;

        Flow::try_from(record).map_err(RepositoryError::from)
    }

    fn delete_flow(&self, id: FlowId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(flows::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
