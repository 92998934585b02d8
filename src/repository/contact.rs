//! Repository implementation for contacts.

use diesel::{Connection, prelude::*};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::{
        contact::{Contact, NewContact, UpdateContact},
        types::{CompanyId, ContactId, PhoneNumber, TagId},
    },
    models::{
        contact::{
            Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
        },
        tag::NewContactTag as DbNewContactTag,
    },
    repository::{
        ContactListQuery, ContactReader, ContactWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
        tag::tags_for_contacts,
    },
    schema::{contact_tags, contacts},
};

fn filtered_contacts(query: &ContactListQuery) -> contacts::BoxedQuery<'static, Sqlite> {
    let mut items = contacts::table
        .filter(contacts::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        items = items.filter(
            contacts::name
                .like(pattern.clone())
                .or(contacts::number.like(pattern.clone()))
                .or(contacts::email.like(pattern)),
        );
    }

    items
}

/// Converts rows into domain contacts with their tags attached.
fn with_tags(
    conn: &mut SqliteConnection,
    db_contacts: Vec<DbContact>,
) -> RepositoryResult<Vec<Contact>> {
    let ids = db_contacts.iter().map(|c| c.id).collect::<Vec<_>>();
    let mut tags = tags_for_contacts(conn, &ids)?;

    db_contacts
        .into_iter()
        .map(|db_contact| {
            let id = db_contact.id;
            let mut contact = Contact::try_from(db_contact).map_err(RepositoryError::from)?;
            contact.tags = tags.remove(&id).unwrap_or_default();
            Ok(contact)
        })
        .collect()
}

fn single_with_tags(conn: &mut SqliteConnection, db_contact: DbContact) -> RepositoryResult<Contact> {
    with_tags(conn, vec![db_contact])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl ContactReader for DieselRepository {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Contact>> {
        let mut conn = self.conn()?;
        let db_contact = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::company_id.eq(company_id.get()))
            .first::<DbContact>(&mut conn)
            .optional()?;

        db_contact
            .map(|c| single_with_tags(&mut conn, c))
            .transpose()
    }

    fn get_contact_by_number(
        &self,
        number: &PhoneNumber,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Contact>> {
        let mut conn = self.conn()?;
        let db_contact = contacts::table
            .filter(contacts::number.eq(number.as_str()))
            .filter(contacts::company_id.eq(company_id.get()))
            .first::<DbContact>(&mut conn)
            .optional()?;

        db_contact
            .map(|c| single_with_tags(&mut conn, c))
            .transpose()
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_contacts(&query).count().get_result(&mut conn)?;

        let mut items = filtered_contacts(&query).order((contacts::name.asc(), contacts::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let db_contacts = items.load::<DbContact>(&mut conn)?;
        let contacts = with_tags(&mut conn, db_contacts)?;

        Ok((total as usize, contacts))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        let mut conn = self.conn()?;
        let db_new_contact: DbNewContact = new_contact.into();

        let db_contact = diesel::insert_into(contacts::table)
            .values(&db_new_contact)
            .get_result::<DbContact>(&mut conn)?;

        single_with_tags(&mut conn, db_contact)
    }

    fn import_contacts(&self, new_contacts: &[NewContact]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewContact> = new_contacts.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for contact in &insertables {
                inserted += diesel::insert_or_ignore_into(contacts::table)
                    .values(contact)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(RepositoryError::from)
    }

    fn update_contact(&self, id: ContactId, updates: &UpdateContact) -> RepositoryResult<Contact> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateContact = updates.into();

        let db_contact = diesel::update(contacts::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbContact>(&mut conn)?;

        single_with_tags(&mut conn, db_contact)
    }

    fn set_contact_tags(&self, id: ContactId, tag_ids: &[TagId]) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let links = tag_ids
            .iter()
            .map(|tag_id| DbNewContactTag {
                contact_id: id.get(),
                tag_id: tag_id.get(),
            })
            .collect::<Vec<_>>();

        conn.transaction::<(), diesel::result::Error, _>(move |conn| {
            diesel::delete(contact_tags::table.filter(contact_tags::contact_id.eq(id.get())))
                .execute(conn)?;

            if !links.is_empty() {
                diesel::insert_or_ignore_into(contact_tags::table)
                    .values(links)
                    .execute(conn)?;
            }

            Ok(())
        })
        .map_err(RepositoryError::from)
    }

    fn set_contact_active(&self, id: ContactId, active: bool) -> RepositoryResult<Contact> {
        let mut conn = self.conn()?;
        let db_contact = diesel::update(contacts::table.find(id.get()))
            .set((
                contacts::active.eq(active),
                contacts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbContact>(&mut conn)?;

        single_with_tags(&mut conn, db_contact)
    }

    fn delete_contact(&self, id: ContactId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(contacts::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
