use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, HexColor, TagId, TagName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub company_id: CompanyId,
    pub name: TagName,
    pub color: HexColor,
    /// Tag doubles as a Kanban lane.
    pub kanban: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTag {
    pub company_id: CompanyId,
    pub name: TagName,
    pub color: HexColor,
    pub kanban: bool,
}

#[derive(Clone, Debug)]
pub struct UpdateTag {
    pub name: TagName,
    pub color: HexColor,
    pub kanban: bool,
}
