//! Response shapes returned by the JSON API.

pub mod auth;
pub mod lists;
pub mod users;
