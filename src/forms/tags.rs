use serde::Deserialize;
use validator::Validate;

use crate::domain::tag::{NewTag, UpdateTag};
use crate::domain::types::{CompanyId, HexColor, TagName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct TagForm {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub kanban: bool,
}

pub struct TagPayload {
    pub name: TagName,
    pub color: HexColor,
    pub kanban: bool,
}

impl TryFrom<TagForm> for TagPayload {
    type Error = FormError;

    fn try_from(form: TagForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: TagName::new(form.name).map_err(|_| FormError::InvalidName)?,
            color: HexColor::new(form.color).map_err(|_| FormError::InvalidColor)?,
            kanban: form.kanban,
        })
    }
}

impl TagPayload {
    pub fn into_new(self, company_id: CompanyId) -> NewTag {
        NewTag {
            company_id,
            name: self.name,
            color: self.color,
            kanban: self.kanban,
        }
    }

    pub fn into_update(self) -> UpdateTag {
        UpdateTag {
            name: self.name,
            color: self.color,
            kanban: self.kanban,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagListParams {
    pub search_param: Option<String>,
    pub page_number: Option<usize>,
    pub kanban: Option<bool>,
}
