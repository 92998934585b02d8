use serde::Deserialize;

use crate::domain::quick_message::UpdateQuickMessage;
use crate::domain::types::{MessageBody, Shortcode};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct QuickMessageForm {
    pub shortcode: String,
    pub message: String,
    #[serde(default)]
    pub geral: bool,
}

impl TryFrom<QuickMessageForm> for UpdateQuickMessage {
    type Error = FormError;

    fn try_from(form: QuickMessageForm) -> Result<Self, Self::Error> {
        Ok(Self {
            shortcode: Shortcode::new(form.shortcode).map_err(|_| FormError::InvalidName)?,
            message: MessageBody::new(form.message).map_err(|_| FormError::InvalidMessage)?,
            geral: form.geral,
        })
    }
}
