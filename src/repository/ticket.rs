//! Repository implementation for tickets and their kanban lanes.

use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel::{Connection, prelude::*};

use crate::{
    domain::{
        ticket::{NewTicket, Ticket, UpdateTicket},
        types::{CompanyId, TagId, TicketId},
    },
    models::{
        tag::NewTicketTag as DbNewTicketTag,
        ticket::{NewTicket as DbNewTicket, Ticket as DbTicket, UpdateTicket as DbUpdateTicket},
    },
    repository::{
        DieselRepository, TicketListQuery, TicketReader, TicketWriter,
        errors::{RepositoryError, RepositoryResult},
        tag::tags_for_tickets,
    },
    schema::{contacts, tags, ticket_tags, tickets},
};

fn filtered_tickets(query: &TicketListQuery) -> tickets::BoxedQuery<'static, Sqlite> {
    let mut items = tickets::table
        .filter(tickets::company_id.eq(query.company_id.get()))
        .into_boxed();

    if !query.statuses.is_empty() {
        let statuses = query
            .statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>();
        items = items.filter(tickets::status.eq_any(statuses));
    }

    if let Some(user_id) = query.visible_to {
        items = items.filter(
            tickets::user_id
                .eq(user_id.get())
                .or(tickets::user_id.is_null()),
        );
    }

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        let matching_contacts = contacts::table
            .filter(contacts::name.like(pattern.clone()))
            .select(contacts::id);
        items = items.filter(
            tickets::last_message
                .like(pattern)
                .or(tickets::contact_id.eq_any(matching_contacts)),
        );
    }

    items
}

fn with_tags(
    conn: &mut SqliteConnection,
    db_tickets: Vec<DbTicket>,
) -> RepositoryResult<Vec<Ticket>> {
    let ids = db_tickets.iter().map(|t| t.id).collect::<Vec<_>>();
    let mut tags = tags_for_tickets(conn, &ids)?;

    db_tickets
        .into_iter()
        .map(|db_ticket| {
            let id = db_ticket.id;
            let mut ticket = Ticket::try_from(db_ticket).map_err(RepositoryError::from)?;
            ticket.tags = tags.remove(&id).unwrap_or_default();
            Ok(ticket)
        })
        .collect()
}

fn load_ticket(conn: &mut SqliteConnection, id: i32) -> RepositoryResult<Ticket> {
    let db_ticket = tickets::table.find(id).first::<DbTicket>(conn)?;
    with_tags(conn, vec![db_ticket])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl TicketReader for DieselRepository {
    fn get_ticket_by_id(
        &self,
        id: TicketId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Ticket>> {
        let mut conn = self.conn()?;
        let db_ticket = tickets::table
            .filter(tickets::id.eq(id.get()))
            .filter(tickets::company_id.eq(company_id.get()))
            .first::<DbTicket>(&mut conn)
            .optional()?;

        match db_ticket {
            Some(db_ticket) => Ok(with_tags(&mut conn, vec![db_ticket])?.pop()),
            None => Ok(None),
        }
    }

    fn list_tickets(&self, query: TicketListQuery) -> RepositoryResult<(usize, Vec<Ticket>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_tickets(&query).count().get_result(&mut conn)?;

        let mut items =
            filtered_tickets(&query).order((tickets::updated_at.desc(), tickets::id.desc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let db_tickets = items.load::<DbTicket>(&mut conn)?;
        let tickets = with_tags(&mut conn, db_tickets)?;

        Ok((total as usize, tickets))
    }
}

impl TicketWriter for DieselRepository {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket> {
        let mut conn = self.conn()?;
        let db_new_ticket: DbNewTicket = new_ticket.into();

        let db_ticket = diesel::insert_into(tickets::table)
            .values(&db_new_ticket)
            .get_result::<DbTicket>(&mut conn)?;

        Ticket::try_from(db_ticket).map_err(RepositoryError::from)
    }

    fn update_ticket(&self, id: TicketId, updates: &UpdateTicket) -> RepositoryResult<Ticket> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateTicket = updates.into();

        diesel::update(tickets::table.find(id.get()))
            .set(&db_updates)
            .execute(&mut conn)?;

        load_ticket(&mut conn, id.get())
    }

    fn delete_ticket(&self, id: TicketId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(tickets::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn move_ticket_to_lane(&self, id: TicketId, tag_id: TagId) -> RepositoryResult<Ticket> {
        let mut conn = self.conn()?;

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            let kanban_tags = tags::table
                .filter(tags::kanban.eq(true))
                .select(tags::id);

            diesel::delete(
                ticket_tags::table
                    .filter(ticket_tags::ticket_id.eq(id.get()))
                    .filter(ticket_tags::tag_id.eq_any(kanban_tags)),
            )
            .execute(conn)?;

            diesel::insert_or_ignore_into(ticket_tags::table)
                .values(&DbNewTicketTag {
                    ticket_id: id.get(),
                    tag_id: tag_id.get(),
                })
                .execute(conn)?;

            diesel::update(tickets::table.find(id.get()))
                .set(tickets::updated_at.eq(chrono::Utc::now().naive_utc()))
                .execute(conn)?;

            Ok(())
        })?;

        load_ticket(&mut conn, id.get())
    }

    fn clear_ticket_lanes(&self, id: TicketId) -> RepositoryResult<Ticket> {
        let mut conn = self.conn()?;

        let kanban_tags = tags::table
            .filter(tags::kanban.eq(true))
            .select(tags::id);

        diesel::delete(
            ticket_tags::table
                .filter(ticket_tags::ticket_id.eq(id.get()))
                .filter(ticket_tags::tag_id.eq_any(kanban_tags)),
        )
        .execute(&mut conn)?;

        load_ticket(&mut conn, id.get())
    }
}
