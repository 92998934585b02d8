//! Outbound email: template rendering and the relay transport.

use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::models::zmq::ZmqEmailMessage;
use crate::zmq::ZmqPublisher;

const SIGNUP_TEMPLATE: &str = "email/signup.html";
const RECOVER_TEMPLATE: &str = "email/recover_password.html";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Hands rendered emails to the mail relay over ZeroMQ.
pub struct ZmqMailer {
    publisher: Arc<ZmqPublisher>,
}

impl ZmqMailer {
    pub fn new(publisher: Arc<ZmqPublisher>) -> Self {
        Self { publisher }
    }
}

impl Mailer for ZmqMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = ZmqEmailMessage {
            to: email.to.clone(),
            subject: email.subject.clone(),
            html: email.html.clone(),
        };
        let body = serde_json::to_vec(&message)?;

        self.publisher
            .send_frames(vec![body])
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

/// Logs instead of sending; used when the mail relay cannot be reached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        log::warn!("Mail relay unavailable, dropping \"{}\" to {}", email.subject, email.to);
        Ok(())
    }
}

/// Email templates compiled into the binary.
pub struct MailTemplates {
    tera: Tera,
}

impl MailTemplates {
    pub fn new() -> Result<Self, MailError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                SIGNUP_TEMPLATE,
                include_str!("../../templates/email/signup.html"),
            ),
            (
                RECOVER_TEMPLATE,
                include_str!("../../templates/email/recover_password.html"),
            ),
        ])?;
        Ok(Self { tera })
    }

    pub fn signup(
        &self,
        to: &str,
        name: &str,
        company: &str,
        due_date: &str,
        login_url: &str,
    ) -> Result<OutgoingEmail, MailError> {
        let mut context = Context::new();
        context.insert("name", name);
        context.insert("email", to);
        context.insert("company", company);
        context.insert("due_date", due_date);
        context.insert("login_url", login_url);

        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: "Bem-vindo ao Ojos Chat".to_string(),
            html: self.tera.render(SIGNUP_TEMPLATE, &context)?,
        })
    }

    pub fn recover_password(
        &self,
        to: &str,
        name: &str,
        reset_url: &str,
        valid_hours: i64,
    ) -> Result<OutgoingEmail, MailError> {
        let mut context = Context::new();
        context.insert("name", name);
        context.insert("reset_url", reset_url);
        context.insert("valid_hours", &valid_hours);

        Ok(OutgoingEmail {
            to: to.to_string(),
            subject: "Redefinição de senha".to_string(),
            html: self.tera.render(RECOVER_TEMPLATE, &context)?,
        })
    }
}
