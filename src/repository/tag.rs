//! Repository implementation for tags and tag links.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::{
        tag::{NewTag, Tag, UpdateTag},
        types::{CompanyId, TagId},
    },
    models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag},
    repository::{
        DieselRepository, TagListQuery, TagReader, TagWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{contact_tags, tags, ticket_tags},
};

fn filtered_tags(query: &TagListQuery) -> tags::BoxedQuery<'static, Sqlite> {
    let mut items = tags::table
        .filter(tags::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        items = items.filter(tags::name.like(format!("%{search}%")));
    }
    if let Some(kanban) = query.kanban {
        items = items.filter(tags::kanban.eq(kanban));
    }

    items
}

fn group_tags(rows: Vec<(i32, DbTag)>) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
    let mut grouped: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (owner_id, db_tag) in rows {
        let tag = Tag::try_from(db_tag).map_err(RepositoryError::from)?;
        grouped.entry(owner_id).or_default().push(tag);
    }
    Ok(grouped)
}

/// Tags attached to each of the given contacts, keyed by contact id.
pub(crate) fn tags_for_contacts(
    conn: &mut SqliteConnection,
    contact_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
    let rows = tags::table
        .inner_join(contact_tags::table)
        .filter(contact_tags::contact_id.eq_any(contact_ids))
        .order(tags::name.asc())
        .select((contact_tags::contact_id, tags::all_columns))
        .load::<(i32, DbTag)>(conn)?;

    group_tags(rows)
}

/// Tags attached to each of the given tickets, keyed by ticket id.
pub(crate) fn tags_for_tickets(
    conn: &mut SqliteConnection,
    ticket_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
    let rows = tags::table
        .inner_join(ticket_tags::table)
        .filter(ticket_tags::ticket_id.eq_any(ticket_ids))
        .order(tags::name.asc())
        .select((ticket_tags::ticket_id, tags::all_columns))
        .load::<(i32, DbTag)>(conn)?;

    group_tags(rows)
}

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: TagId, company_id: CompanyId) -> RepositoryResult<Option<Tag>> {
        let mut conn = self.conn()?;
        let db_tag = tags::table
            .filter(tags::id.eq(id.get()))
            .filter(tags::company_id.eq(company_id.get()))
            .first::<DbTag>(&mut conn)
            .optional()?;

        db_tag
            .map(|t| Tag::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_tags(&query).count().get_result(&mut conn)?;

        let mut items = filtered_tags(&query).order((tags::name.asc(), tags::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let tags = items
            .load::<DbTag>(&mut conn)?
            .into_iter()
            .map(|t| Tag::try_from(t).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, tags))
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag> {
        let mut conn = self.conn()?;
        let db_new_tag: DbNewTag = new_tag.into();

        let db_tag = diesel::insert_into(tags::table)
            .values(&db_new_tag)
            .get_result::<DbTag>(&mut conn)?;

        Tag::try_from(db_tag).map_err(RepositoryError::from)
    }

    fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateTag = updates.into();

        let db_tag = diesel::update(tags::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        Tag::try_from(db_tag).map_err(RepositoryError::from)
    }

    fn delete_tag(&self, id: TagId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(tags::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
