//! Repository implementation for quick messages.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        quick_message::{NewQuickMessage, QuickMessage, UpdateQuickMessage},
        types::{CompanyId, QuickMessageId},
    },
    models::quick_message::{
        NewQuickMessage as DbNewQuickMessage, QuickMessage as DbQuickMessage,
        UpdateQuickMessage as DbUpdateQuickMessage,
    },
    repository::{
        DieselRepository, QuickMessageListQuery, QuickMessageReader, QuickMessageWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::quick_messages,
};

fn filtered_quick_messages(
    query: &QuickMessageListQuery,
) -> quick_messages::BoxedQuery<'static, Sqlite> {
    let mut items = quick_messages::table
        .filter(quick_messages::company_id.eq(query.company_id.get()))
        .filter(
            quick_messages::geral
                .eq(true)
                .or(quick_messages::user_id.eq(query.user_id.get())),
        )
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        items = items.filter(
            quick_messages::shortcode
                .like(pattern.clone())
                .or(quick_messages::message.like(pattern)),
        );
    }

    items
}

impl QuickMessageReader for DieselRepository {
    fn get_quick_message_by_id(
        &self,
        id: QuickMessageId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<QuickMessage>> {
        let mut conn = self.conn()?;
        let record = quick_messages::table
            .filter(quick_messages::id.eq(id.get()))
            .filter(quick_messages::company_id.eq(company_id.get()))
            .first::<DbQuickMessage>(&mut conn)
            .optional()?;

        record
            .map(|r| QuickMessage::try_from(r).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_quick_messages(
        &self,
        query: QuickMessageListQuery,
    ) -> RepositoryResult<(usize, Vec<QuickMessage>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_quick_messages(&query)
            .count()
            .get_result(&mut conn)?;

        let mut items = filtered_quick_messages(&query).order(quick_messages::shortcode.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let records = items
            .load::<DbQuickMessage>(&mut conn)?
            .into_iter()
            .map(|r| QuickMessage::try_from(r).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, records))
    }
}

impl QuickMessageWriter for DieselRepository {
    fn create_quick_message(&self, new_record: &NewQuickMessage) -> RepositoryResult<QuickMessage> {
        let mut conn = self.conn()?;
        let db_new_record: DbNewQuickMessage = new_record.into();

        let record = diesel::insert_into(quick_messages::table)
            .values(&db_new_record)
            .get_result::<DbQuickMessage>(&mut conn)?;

        QuickMessage::try_from(record).map_err(RepositoryError::from)
    }

    fn update_quick_message(
        &self,
        id: QuickMessageId,
        updates: &UpdateQuickMessage,
    ) -> RepositoryResult<QuickMessage> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateQuickMessage = updates.into();

        let record = diesel::update(quick_messages::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbQuickMessage>(&mut conn)?;

        QuickMessage::try_from(record).map_err(RepositoryError::from)
    }

    fn delete_quick_message(&self, id: QuickMessageId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(quick_messages::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
