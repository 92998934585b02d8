//! Bodies of the contact endpoints, including the CSV import.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{NewContact, UpdateContact};
use crate::domain::types::{
    CompanyId, ContactChannel, ContactEmail, ContactName, PhoneNumber, TagId,
};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    /// Complete set of tag ids; replaces the current links.
    #[serde(default)]
    pub tags: Option<Vec<i32>>,
}

pub struct ContactPayload {
    pub name: ContactName,
    pub number: PhoneNumber,
    pub email: Option<ContactEmail>,
    pub channel: ContactChannel,
    pub is_group: bool,
    pub tags: Option<Vec<TagId>>,
}

impl TryFrom<ContactForm> for ContactPayload {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let email = non_blank(form.email)
            .map(|e| ContactEmail::new(e).map_err(|_| FormError::InvalidEmail))
            .transpose()?;
        let channel = match non_blank(form.channel) {
            Some(c) => c.parse().map_err(|_| FormError::InvalidChannel)?,
            None => ContactChannel::default(),
        };
        let tags = form
            .tags
            .map(|ids| {
                ids.into_iter()
                    .map(|id| TagId::new(id).map_err(|_| FormError::InvalidId))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            name: ContactName::new(form.name).map_err(|_| FormError::InvalidName)?,
            number: PhoneNumber::new(form.number).map_err(|_| FormError::InvalidPhoneNumber)?,
            email,
            channel,
            is_group: form.is_group,
            tags,
        })
    }
}

impl ContactPayload {
    pub fn to_new(&self, company_id: CompanyId) -> NewContact {
        NewContact {
            company_id,
            name: self.name.clone(),
            number: self.number.clone(),
            email: self.email.clone(),
            is_group: self.is_group,
            channel: self.channel,
        }
    }

    pub fn to_update(&self) -> UpdateContact {
        UpdateContact {
            name: self.name.clone(),
            number: self.number.clone(),
            email: self.email.clone(),
            channel: self.channel,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BlockContactForm {
    pub active: bool,
}

#[derive(MultipartForm)]
pub struct ImportContactsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl ImportContactsForm {
    pub fn parse(&self, company_id: CompanyId) -> Result<Vec<NewContact>, FormError> {
        let file = std::fs::File::open(self.csv.file.path())
            .map_err(|e| FormError::InvalidCsv(e.to_string()))?;
        parse_contacts_csv(file, company_id)
    }
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    name: String,
    number: String,
    #[serde(default)]
    email: Option<String>,
}

/// Reads `name,number,email` rows. Rows with an unusable name or number are skipped.
pub fn parse_contacts_csv<R: Read>(
    reader: R,
    company_id: CompanyId,
) -> Result<Vec<NewContact>, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut contacts = Vec::new();
    for (line, row) in rdr.deserialize::<ContactRow>().enumerate() {
        let row = row.map_err(|e| FormError::InvalidCsv(e.to_string()))?;

        let (Ok(name), Ok(number)) = (ContactName::new(row.name), PhoneNumber::new(row.number))
        else {
            log::warn!("Skipping contact row {}: invalid name or number", line + 2);
            continue;
        };
        let email = non_blank(row.email).and_then(|e| ContactEmail::new(e).ok());

        contacts.push(NewContact {
            company_id,
            name,
            number,
            email,
            is_group: false,
            channel: ContactChannel::Whatsapp,
        });
    }

    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> CompanyId {
        CompanyId::new(3).unwrap()
    }

    #[test]
    fn csv_rows_are_parsed_and_bad_ones_skipped() {
        let data = "name,number,email\n\
                    Ana, 5511999990000 ,ana@example.com\n\
                    ,5511999990001,\n\
                    Bob,not-a-number,\n\
                    Caio,+5511999990002,\n";

        let contacts = parse_contacts_csv(data.as_bytes(), company()).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].number.as_str(), "+5511999990000");
        assert_eq!(contacts[0].email.as_ref().unwrap().as_str(), "ana@example.com");
        assert_eq!(contacts[1].name.as_str(), "Caio");
        assert!(contacts[1].email.is_none());
    }

    #[test]
    fn csv_without_number_column_is_rejected() {
        let data = "name,email\nAna,ana@example.com\n";
        assert!(matches!(
            parse_contacts_csv(data.as_bytes(), company()),
            Err(FormError::InvalidCsv(_))
        ));
    }

    #[test]
    fn contact_form_defaults_channel_and_validates_tags() {
        let form = ContactForm {
            name: "Ana".into(),
            number: "5511999990000".into(),
            email: Some("".into()),
            channel: None,
            is_group: false,
            tags: Some(vec![1, 2]),
        };
        let payload = ContactPayload::try_from(form).unwrap();
        assert_eq!(payload.channel, ContactChannel::Whatsapp);
        assert!(payload.email.is_none());
        assert_eq!(payload.tags.unwrap().len(), 2);

        let form = ContactForm {
            name: "Ana".into(),
            number: "5511999990000".into(),
            email: None,
            channel: Some("telegram".into()),
            is_group: false,
            tags: None,
        };
        assert!(matches!(
            ContactPayload::try_from(form),
            Err(FormError::InvalidChannel)
        ));
    }
}
