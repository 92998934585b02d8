//! Company (tenant) aggregate.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyEmail, CompanyId, CompanyName};

/// Default length of the trial granted to companies created through signup.
pub const DEFAULT_TRIAL_DAYS: u64 = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: CompanyName,
    pub email: CompanyEmail,
    pub phone: Option<String>,
    pub document: Option<String>,
    /// Whether the company may log in.
    pub status: bool,
    pub due_date: Option<NaiveDate>,
    pub recurrence: String,
    pub plan_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCompany {
    pub name: CompanyName,
    pub email: CompanyEmail,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub due_date: NaiveDate,
    pub plan_id: Option<i32>,
}

impl NewCompany {
    /// Builds a company whose trial ends `trial_days` after `today`.
    #[must_use]
    pub fn trial(
        name: CompanyName,
        email: CompanyEmail,
        phone: Option<String>,
        document: Option<String>,
        plan_id: Option<i32>,
        today: NaiveDate,
        trial_days: u64,
    ) -> Self {
        let due_date = today
            .checked_add_days(Days::new(trial_days))
            .unwrap_or(today);
        Self {
            name,
            email,
            phone: normalize_optional(phone),
            document: normalize_optional(document),
            due_date,
            plan_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCompany {
    pub name: CompanyName,
    pub email: CompanyEmail,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub status: bool,
    pub due_date: Option<NaiveDate>,
    pub recurrence: String,
    pub plan_id: Option<i32>,
}

impl UpdateCompany {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: CompanyName,
        email: CompanyEmail,
        phone: Option<String>,
        document: Option<String>,
        status: bool,
        due_date: Option<NaiveDate>,
        recurrence: Option<String>,
        plan_id: Option<i32>,
    ) -> Self {
        Self {
            name,
            email,
            phone: normalize_optional(phone),
            document: normalize_optional(document),
            status,
            due_date,
            recurrence: recurrence.map(|s| s.trim().to_string()).unwrap_or_default(),
            plan_id,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
