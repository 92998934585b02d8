//! Diesel models for companies.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany,
    UpdateCompany as DomainUpdateCompany,
};
use crate::domain::types::{CompanyEmail, CompanyId, CompanyName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub status: bool,
    pub due_date: Option<NaiveDate>,
    pub recurrence: String,
    pub plan_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
pub struct NewCompany<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub document: Option<&'a str>,
    pub status: bool,
    pub due_date: Option<NaiveDate>,
    pub plan_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub document: Option<&'a str>,
    pub status: bool,
    pub due_date: Option<NaiveDate>,
    pub recurrence: &'a str,
    pub plan_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::try_from(company.id)?,
            name: CompanyName::new(company.name)?,
            email: CompanyEmail::new(company.email)?,
            phone: company.phone,
            document: company.document,
            status: company.status,
            due_date: company.due_date,
            recurrence: company.recurrence,
            plan_id: company.plan_id,
            created_at: company.created_at,
            updated_at: company.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            name: company.name.as_str(),
            email: company.email.as_str(),
            phone: company.phone.as_deref(),
            document: company.document.as_deref(),
            status: true,
            due_date: Some(company.due_date),
            plan_id: company.plan_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateCompany> for UpdateCompany<'a> {
    fn from(company: &'a DomainUpdateCompany) -> Self {
        Self {
            name: company.name.as_str(),
            email: company.email.as_str(),
            phone: company.phone.as_deref(),
            document: company.document.as_deref(),
            status: company.status,
            due_date: company.due_date,
            recurrence: company.recurrence.as_str(),
            plan_id: company.plan_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
