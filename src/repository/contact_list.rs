//! Repository implementation for contact lists and their items.

use std::collections::HashMap;

use diesel::dsl::count_star;
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel::{Connection, prelude::*};

use crate::{
    domain::{
        contact_list::{
            ContactList, ContactListItem, ContactListSummary, NewContactList, NewContactListItem,
            UpdateContactListItem,
        },
        types::{CompanyId, ContactListId, ContactListItemId, ContactListName},
    },
    models::contact_list::{
        ContactList as DbContactList, ContactListItem as DbContactListItem,
        NewContactList as DbNewContactList, NewContactListItem as DbNewContactListItem,
        UpdateContactListItem as DbUpdateContactListItem,
    },
    repository::{
        ContactListItemQuery, ContactListReader, ContactListWriter, ContactListsQuery,
        DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{contact_list_items, contact_lists},
};

fn filtered_lists(query: &ContactListsQuery) -> contact_lists::BoxedQuery<'static, Sqlite> {
    let mut items = contact_lists::table
        .filter(contact_lists::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        items = items.filter(contact_lists::name.like(format!("%{search}%")));
    }

    items
}

fn filtered_items(query: &ContactListItemQuery) -> contact_list_items::BoxedQuery<'static, Sqlite> {
    let mut items = contact_list_items::table
        .filter(contact_list_items::company_id.eq(query.company_id.get()))
        .filter(contact_list_items::contact_list_id.eq(query.contact_list_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        items = items.filter(
            contact_list_items::name
                .like(pattern.clone())
                .or(contact_list_items::number.like(pattern)),
        );
    }

    items
}

/// Item count of each of the given lists, keyed by list id.
fn counts_for_lists(
    conn: &mut SqliteConnection,
    list_ids: &[i32],
) -> RepositoryResult<HashMap<i32, i64>> {
    let rows = contact_list_items::table
        .filter(contact_list_items::contact_list_id.eq_any(list_ids))
        .group_by(contact_list_items::contact_list_id)
        .select((contact_list_items::contact_list_id, count_star()))
        .load::<(i32, i64)>(conn)?;

    Ok(rows.into_iter().collect())
}

/// Name summaries of the given lists, keyed by list id.
pub(crate) fn summaries_for_lists(
    conn: &mut SqliteConnection,
    list_ids: &[i32],
) -> RepositoryResult<HashMap<i32, ContactListSummary>> {
    contact_lists::table
        .filter(contact_lists::id.eq_any(list_ids))
        .load::<DbContactList>(conn)?
        .into_iter()
        .map(|db_list| {
            let id = db_list.id;
            let list = ContactList::try_from(db_list).map_err(RepositoryError::from)?;
            Ok((id, ContactListSummary::from(&list)))
        })
        .collect()
}

fn with_counts(
    conn: &mut SqliteConnection,
    db_lists: Vec<DbContactList>,
) -> RepositoryResult<Vec<ContactList>> {
    let ids = db_lists.iter().map(|l| l.id).collect::<Vec<_>>();
    let counts = counts_for_lists(conn, &ids)?;

    db_lists
        .into_iter()
        .map(|db_list| {
            let id = db_list.id;
            let mut list = ContactList::try_from(db_list).map_err(RepositoryError::from)?;
            list.contacts_count = counts.get(&id).copied().unwrap_or_default();
            Ok(list)
        })
        .collect()
}

fn single_with_count(
    conn: &mut SqliteConnection,
    db_list: DbContactList,
) -> RepositoryResult<ContactList> {
    with_counts(conn, vec![db_list])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl ContactListReader for DieselRepository {
    fn get_contact_list_by_id(
        &self,
        id: ContactListId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<ContactList>> {
        let mut conn = self.conn()?;
        let db_list = contact_lists::table
            .filter(contact_lists::id.eq(id.get()))
            .filter(contact_lists::company_id.eq(company_id.get()))
            .first::<DbContactList>(&mut conn)
            .optional()?;

        db_list
            .map(|l| single_with_count(&mut conn, l))
            .transpose()
    }

    fn list_contact_lists(
        &self,
        query: ContactListsQuery,
    ) -> RepositoryResult<(usize, Vec<ContactList>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_lists(&query).count().get_result(&mut conn)?;

        let mut items = filtered_lists(&query).order(contact_lists::name.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let db_lists = items.load::<DbContactList>(&mut conn)?;
        let lists = with_counts(&mut conn, db_lists)?;

        Ok((total as usize, lists))
    }

    fn get_contact_list_item_by_id(
        &self,
        id: ContactListItemId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<ContactListItem>> {
        let mut conn = self.conn()?;
        let db_item = contact_list_items::table
            .filter(contact_list_items::id.eq(id.get()))
            .filter(contact_list_items::company_id.eq(company_id.get()))
            .first::<DbContactListItem>(&mut conn)
            .optional()?;

        db_item
            .map(|i| ContactListItem::try_from(i).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_contact_list_items(
        &self,
        query: ContactListItemQuery,
    ) -> RepositoryResult<(usize, Vec<ContactListItem>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_items(&query).count().get_result(&mut conn)?;

        let mut items = filtered_items(&query)
            .order((contact_list_items::name.asc(), contact_list_items::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let records = items
            .load::<DbContactListItem>(&mut conn)?
            .into_iter()
            .map(|i| ContactListItem::try_from(i).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, records))
    }
}

impl ContactListWriter for DieselRepository {
    fn create_contact_list(&self, new_list: &NewContactList) -> RepositoryResult<ContactList> {
        let mut conn = self.conn()?;
        let db_new_list: DbNewContactList = new_list.into();

        let db_list = diesel::insert_into(contact_lists::table)
            .values(&db_new_list)
            .get_result::<DbContactList>(&mut conn)?;

        single_with_count(&mut conn, db_list)
    }

    fn rename_contact_list(
        &self,
        id: ContactListId,
        name: &ContactListName,
    ) -> RepositoryResult<ContactList> {
        let mut conn = self.conn()?;
        let db_list = diesel::update(contact_lists::table.find(id.get()))
            .set((
                contact_lists::name.eq(name.as_str()),
                contact_lists::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbContactList>(&mut conn)?;

        single_with_count(&mut conn, db_list)
    }

    fn delete_contact_list(&self, id: ContactListId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(contact_lists::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn create_contact_list_item(
        &self,
        new_item: &NewContactListItem,
    ) -> RepositoryResult<ContactListItem> {
        let mut conn = self.conn()?;
        let db_new_item: DbNewContactListItem = new_item.into();

        let db_item = diesel::insert_into(contact_list_items::table)
            .values(&db_new_item)
            .get_result::<DbContactListItem>(&mut conn)?;

        ContactListItem::try_from(db_item).map_err(RepositoryError::from)
    }

    fn import_contact_list_items(
        &self,
        new_items: &[NewContactListItem],
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewContactListItem> = new_items.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for item in &insertables {
                inserted += diesel::insert_or_ignore_into(contact_list_items::table)
                    .values(item)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(RepositoryError::from)
    }

    fn update_contact_list_item(
        &self,
        id: ContactListItemId,
        updates: &UpdateContactListItem,
    ) -> RepositoryResult<ContactListItem> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateContactListItem = updates.into();

        let db_item = diesel::update(contact_list_items::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbContactListItem>(&mut conn)?;

        ContactListItem::try_from(db_item).map_err(RepositoryError::from)
    }

    fn delete_contact_list_item(&self, id: ContactListItemId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected =
            diesel::delete(contact_list_items::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
