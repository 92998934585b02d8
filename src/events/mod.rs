//! Per-company realtime notifications.
//!
//! Every mutation is announced on the company's namespace under the event name
//! `company-{id}-{resource}`. Delivery is fire-and-forget: publishing never
//! fails the request that triggered it.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::types::CompanyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Tag,
    Contact,
    Ticket,
    Campaign,
    Schedule,
    QuickMessage,
    ContactList,
    ContactListItem,
    Flow,
}

impl Resource {
    pub const fn name(self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Tag => "tag",
            Resource::Contact => "contact",
            Resource::Ticket => "ticket",
            Resource::Campaign => "campaign",
            Resource::Schedule => "schedule",
            Resource::QuickMessage => "quickmessage",
            Resource::ContactList => "ContactList",
            Resource::ContactListItem => "ContactListItem",
            Resource::Flow => "flowbuilder",
        }
    }

    /// Payload key holding the record on create/update.
    const fn record_key(self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Tag => "tag",
            Resource::Contact => "contact",
            Resource::Ticket => "ticket",
            Resource::Schedule => "schedule",
            Resource::Flow => "flow",
            Resource::Campaign
            | Resource::QuickMessage
            | Resource::ContactList
            | Resource::ContactListItem => "record",
        }
    }

    /// Payload key holding the id on delete.
    const fn id_key(self) -> &'static str {
        match self {
            Resource::User => "userId",
            Resource::Tag => "tagId",
            Resource::Contact => "contactId",
            Resource::Ticket => "ticketId",
            Resource::Schedule => "scheduleId",
            Resource::Flow => "flowId",
            Resource::Campaign
            | Resource::QuickMessage
            | Resource::ContactList
            | Resource::ContactListItem => "id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RealtimeEvent {
    /// Company id the event is scoped to.
    pub namespace: i32,
    pub event: String,
    pub payload: Value,
}

impl RealtimeEvent {
    fn new(company_id: CompanyId, resource: Resource, payload: Value) -> Self {
        Self {
            namespace: company_id.get(),
            event: format!("company-{}-{}", company_id.get(), resource.name()),
            payload,
        }
    }

    /// `{action, <record key>: record}` for creates and updates.
    pub fn record<T: Serialize>(
        company_id: CompanyId,
        resource: Resource,
        action: Action,
        record: &T,
    ) -> Self {
        let record = serde_json::to_value(record).unwrap_or_else(|err| {
            log::error!("Failed to serialize {} event payload: {err}", resource.name());
            Value::Null
        });

        let mut payload = Map::new();
        payload.insert("action".to_string(), json!(action.as_str()));
        payload.insert(resource.record_key().to_string(), record);

        Self::new(company_id, resource, Value::Object(payload))
    }

    /// `{action: "delete", <id key>: id}`.
    pub fn deleted(company_id: CompanyId, resource: Resource, id: i32) -> Self {
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!(Action::Delete.as_str()));
        payload.insert(resource.id_key().to_string(), json!(id));

        Self::new(company_id, resource, Value::Object(payload))
    }
}

/// Sink for realtime events.
pub trait EventPublisher: Send + Sync {
    /// Hands the event to the transport; failures are logged, never returned.
    fn publish(&self, event: RealtimeEvent);
}

/// Publisher that only logs; used when no events endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl EventPublisher for LogPublisher {
    fn publish(&self, event: RealtimeEvent) {
        log::debug!("realtime event {} on namespace {}", event.event, event.namespace);
    }
}
