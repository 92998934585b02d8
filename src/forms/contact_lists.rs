//! Bodies of the contact list endpoints.

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;

use crate::domain::contact_list::{NewContactListItem, UpdateContactListItem};
use crate::domain::types::{
    CompanyId, ContactEmail, ContactListId, ContactListName, ContactName, PhoneNumber,
};
use crate::forms::contacts::parse_contacts_csv;
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize)]
pub struct ContactListForm {
    pub name: String,
}

impl TryFrom<ContactListForm> for ContactListName {
    type Error = FormError;

    fn try_from(form: ContactListForm) -> Result<Self, Self::Error> {
        ContactListName::new(form.name).map_err(|_| FormError::InvalidName)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListItemForm {
    /// Required on create; an item never moves to another list.
    #[serde(default)]
    pub contact_list_id: Option<i32>,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactListItemForm {
    pub fn contact_list_id(&self) -> Result<ContactListId, FormError> {
        self.contact_list_id
            .ok_or(FormError::InvalidId)
            .and_then(|id| ContactListId::new(id).map_err(|_| FormError::InvalidId))
    }
}

impl TryFrom<ContactListItemForm> for UpdateContactListItem {
    type Error = FormError;

    fn try_from(form: ContactListItemForm) -> Result<Self, Self::Error> {
        let email = non_blank(form.email)
            .map(|e| ContactEmail::new(e).map_err(|_| FormError::InvalidEmail))
            .transpose()?;

        Ok(Self {
            name: ContactName::new(form.name).map_err(|_| FormError::InvalidName)?,
            number: PhoneNumber::new(form.number).map_err(|_| FormError::InvalidPhoneNumber)?,
            email,
        })
    }
}

impl UpdateContactListItem {
    pub fn into_new(self, company_id: CompanyId, contact_list_id: ContactListId) -> NewContactListItem {
        NewContactListItem {
            company_id,
            contact_list_id,
            name: self.name,
            number: self.number,
            email: self.email,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListItemParams {
    pub search_param: Option<String>,
    pub page_number: Option<usize>,
    pub contact_list_id: i32,
}

#[derive(MultipartForm)]
pub struct ImportContactListForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl ImportContactListForm {
    /// Same `name,number,email` layout as the contact import.
    pub fn parse(
        &self,
        company_id: CompanyId,
        contact_list_id: ContactListId,
    ) -> Result<Vec<NewContactListItem>, FormError> {
        let file = std::fs::File::open(self.csv.file.path())
            .map_err(|e| FormError::InvalidCsv(e.to_string()))?;
        Ok(parse_contacts_csv(file, company_id)?
            .into_iter()
            .map(|contact| NewContactListItem {
                company_id,
                contact_list_id,
                name: contact.name,
                number: contact.number,
                email: contact.email,
            })
            .collect())
    }
}
