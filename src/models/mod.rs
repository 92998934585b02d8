//! Database models and wire formats shared across the repository and services.

pub mod campaign;
pub mod company;
pub mod config;
pub mod contact;
pub mod contact_list;
pub mod flow;
pub mod quick_message;
pub mod schedule;
pub mod setting;
pub mod tag;
pub mod ticket;
pub mod user;
pub mod zmq;
