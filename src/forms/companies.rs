use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::company::UpdateCompany;
use crate::domain::types::{CompanyEmail, CompanyName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub plan_id: Option<i32>,
}

fn default_status() -> bool {
    true
}

impl TryFrom<CompanyForm> for UpdateCompany {
    type Error = FormError;

    fn try_from(form: CompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(UpdateCompany::new(
            CompanyName::new(form.name).map_err(|_| FormError::InvalidName)?,
            CompanyEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            form.phone,
            form.document,
            form.status,
            form.due_date,
            form.recurrence,
            form.plan_id,
        ))
    }
}
