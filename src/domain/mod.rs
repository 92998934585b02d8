//! Domain aggregates exposed by the service layer.

pub mod campaign;
pub mod company;
pub mod contact;
pub mod contact_list;
pub mod flow;
pub mod quick_message;
pub mod schedule;
pub mod setting;
pub mod tag;
pub mod ticket;
pub mod types;
pub mod user;
