use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, MessageBody, QuickMessageId, Shortcode, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickMessage {
    pub id: QuickMessageId,
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub shortcode: Shortcode,
    pub message: MessageBody,
    /// Shared with every user of the company.
    pub geral: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewQuickMessage {
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub shortcode: Shortcode,
    pub message: MessageBody,
    pub geral: bool,
}

#[derive(Clone, Debug)]
pub struct UpdateQuickMessage {
    pub shortcode: Shortcode,
    pub message: MessageBody,
    pub geral: bool,
}
