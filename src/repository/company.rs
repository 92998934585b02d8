//! Repository implementation for companies.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        company::{Company, NewCompany, UpdateCompany},
        types::CompanyId,
        user::{NewUser, User},
    },
    models::{
        company::{
            Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
        },
        user::{NewUser as DbNewUser, User as DbUser},
    },
    repository::{
        CompanyListQuery, CompanyReader, CompanyWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{companies, users},
};

fn filtered_companies(query: &CompanyListQuery) -> companies::BoxedQuery<'static, Sqlite> {
    let mut items = companies::table.into_boxed();

    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        items = items.filter(
            companies::name
                .like(pattern.clone())
                .or(companies::email.like(pattern)),
        );
    }

    items
}

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>> {
        let mut conn = self.conn()?;
        let db_company = companies::table
            .find(id.get())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        match db_company {
            Some(db_company) => Ok(Some(
                Company::try_from(db_company).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_companies(&query).count().get_result(&mut conn)?;

        let mut items = filtered_companies(&query).order(companies::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.sql_limit())
                .offset(pagination.sql_offset());
        }

        let companies = items
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(|c| Company::try_from(c).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, companies))
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company_with_admin(
        &self,
        company: &NewCompany,
        admin: &NewUser,
    ) -> RepositoryResult<(Company, User)> {
        let mut conn = self.conn()?;
        let db_new_company: DbNewCompany = company.into();

        let (db_company, db_user) =
            conn.transaction::<(DbCompany, DbUser), diesel::result::Error, _>(|conn| {
                let db_company = diesel::insert_into(companies::table)
                    .values(&db_new_company)
                    .get_result::<DbCompany>(conn)?;

                let mut db_new_user: DbNewUser = admin.into();
                db_new_user.company_id = db_company.id;

                let db_user = diesel::insert_into(users::table)
                    .values(&db_new_user)
                    .get_result::<DbUser>(conn)?;

                Ok((db_company, db_user))
            })?;

        Ok((
            Company::try_from(db_company).map_err(RepositoryError::from)?,
            User::try_from(db_user).map_err(RepositoryError::from)?,
        ))
    }

    fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> RepositoryResult<Company> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateCompany = updates.into();

        let db_company = diesel::update(companies::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbCompany>(&mut conn)?;

        Company::try_from(db_company).map_err(RepositoryError::from)
    }

    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let affected = diesel::delete(companies::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
