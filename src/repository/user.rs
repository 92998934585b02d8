//! Repository implementation for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        types::{CompanyId, ResetToken, UserEmail, UserId},
        user::{NewUser, UpdateUser, User, UserCredentials},
    },
    models::user::{
        NewUser as DbNewUser, UpdatePassword as DbUpdatePassword, UpdateUser as DbUpdateUser,
        User as DbUser,
    },
    repository::{
        DieselRepository, UserListQuery, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::users,
};

fn filtered_users(query: &UserListQuery) -> users::BoxedQuery<'static, Sqlite> {
    let mut items = users::table
        .filter(users::company_id.eq(query.company_id.get()))
        .into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        items = items.filter(users::name.like(pattern.clone()).or(users::email.like(pattern)));
    }

    items
}

fn into_domain(db_user: DbUser) -> RepositoryResult<User> {
    User::try_from(db_user).map_err(RepositoryError::from)
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId, company_id: CompanyId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::id.eq(id.get()))
            .filter(users::company_id.eq(company_id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(into_domain).transpose()
    }

    fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(into_domain).transpose()
    }

    fn get_user_credentials(&self, email: &UserEmail) -> RepositoryResult<Option<UserCredentials>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(|u| UserCredentials::try_from(u).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_users(&query).count().get_result(&mut conn)?;

        let mut items = filtered_users(&query).order((users::name.asc(), users::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let users = items
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, users))
    }

    fn list_company_users(&self, company_id: CompanyId) -> RepositoryResult<Vec<User>> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::company_id.eq(company_id.get()))
            .order(users::name.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn get_user_by_reset_token(
        &self,
        token: &ResetToken,
        now: NaiveDateTime,
    ) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::reset_password_token.eq(token.to_string()))
            .filter(users::reset_password_expires.gt(now))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user.map(into_domain).transpose()
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        into_domain(db_user)
    }

    fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let db_user = conn.transaction::<DbUser, diesel::result::Error, _>(|conn| {
            if let Some(password_hash) = &updates.password_hash {
                diesel::update(users::table.find(id.get()))
                    .set(users::password_hash.eq(password_hash))
                    .execute(conn)?;
            }

            diesel::update(users::table.find(id.get()))
                .set(&db_updates)
                .get_result::<DbUser>(conn)
        })?;

        into_domain(db_user)
    }

    fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(users::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn set_user_password(&self, id: UserId, password_hash: &str) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let changes = DbUpdatePassword {
            password_hash,
            reset_password_token: None,
            reset_password_expires: None,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        diesel::update(users::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)?;
        Ok(())
    }

    fn set_reset_token(
        &self,
        id: UserId,
        token: &ResetToken,
        expires: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::update(users::table.find(id.get()))
            .set((
                users::reset_password_token.eq(token.to_string()),
                users::reset_password_expires.eq(expires),
            ))
            .execute(&mut conn)?;
        Ok(())
    }

    fn update_profile_image(&self, id: UserId, image: &str) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_user = diesel::update(users::table.find(id.get()))
            .set((
                users::profile_image.eq(image),
                users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        into_domain(db_user)
    }

    fn update_tickets_width(&self, id: UserId, width: i32) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_user = diesel::update(users::table.find(id.get()))
            .set((
                users::default_tickets_manager_width.eq(width),
                users::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .get_result::<DbUser>(&mut conn)?;

        into_domain(db_user)
    }
}
