use serde::{Deserialize, Serialize};

/// Email handed to the mail relay over ZeroMQ.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ZmqEmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Realtime notification as published on the events socket.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ZmqRealtimeMessage {
    pub namespace: i32,
    pub event: String,
    pub payload: serde_json::Value,
}
