use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::types::{ContactId, MessageBody};
use crate::forms::{FormError, parse_datetime};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm {
    pub contact_id: i32,
    pub body: String,
    pub send_at: String,
}

pub struct SchedulePayload {
    pub contact_id: ContactId,
    pub body: MessageBody,
    pub send_at: NaiveDateTime,
}

impl ScheduleForm {
    /// Validates the body; `send_at` must be later than `now`.
    pub fn into_payload(self, now: NaiveDateTime) -> Result<SchedulePayload, FormError> {
        let send_at = parse_datetime(&self.send_at)?;
        if send_at <= now {
            return Err(FormError::InvalidDate);
        }

        Ok(SchedulePayload {
            contact_id: ContactId::new(self.contact_id).map_err(|_| FormError::InvalidId)?,
            body: MessageBody::new(self.body).map_err(|_| FormError::InvalidMessage)?,
            send_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleListParams {
    pub search_param: Option<String>,
    pub page_number: Option<usize>,
    pub contact_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn form(send_at: &str) -> ScheduleForm {
        ScheduleForm {
            contact_id: 1,
            body: "Reminder".into(),
            send_at: send_at.into(),
        }
    }

    #[test]
    fn future_send_at_is_accepted() {
        let payload = form("2025-05-01T12:30:00Z").into_payload(now()).unwrap();
        assert_eq!(payload.body.as_str(), "Reminder");
    }

    #[test]
    fn past_send_at_is_rejected() {
        assert!(matches!(
            form("2025-05-01T12:00:00Z").into_payload(now()),
            Err(FormError::InvalidDate)
        ));
    }

    #[test]
    fn blank_body_is_rejected() {
        let mut form = form("2025-06-01T00:00:00Z");
        form.body = "   ".into();
        assert!(matches!(
            form.into_payload(now()),
            Err(FormError::InvalidMessage)
        ));
    }
}
