//! Background ZeroMQ PUB socket used for realtime events and outbound mail.

use std::sync::mpsc::{self, Sender};
use std::thread;

use thiserror::Error;

use crate::events::{EventPublisher, RealtimeEvent};
use crate::models::zmq::ZmqRealtimeMessage;

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("zmq error: {0}")]
    Zmq(#[from] zmq::Error),

    #[error("failed to spawn publisher thread: {0}")]
    Io(#[from] std::io::Error),

    #[error("publisher thread has stopped")]
    Closed,
}

/// Owns a PUB socket on a dedicated thread; callers enqueue multipart frames.
pub struct ZmqPublisher {
    sender: Sender<Vec<Vec<u8>>>,
}

impl ZmqPublisher {
    /// Connects a PUB socket to `endpoint` and starts the sending thread.
    pub fn start(endpoint: &str) -> Result<Self, PublisherError> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUB)?;
        socket.connect(endpoint)?;

        let (sender, receiver) = mpsc::channel::<Vec<Vec<u8>>>();
        let endpoint = endpoint.to_string();

        thread::Builder::new()
            .name("zmq-publisher".to_string())
            .spawn(move || {
                let _context = context;
                for frames in receiver {
                    if let Err(err) = socket.send_multipart(frames, 0) {
                        log::error!("Failed to publish to {endpoint}: {err}");
                    }
                }
                log::info!("ZMQ publisher for {endpoint} stopped");
            })?;

        Ok(Self { sender })
    }

    pub fn send_frames(&self, frames: Vec<Vec<u8>>) -> Result<(), PublisherError> {
        self.sender.send(frames).map_err(|_| PublisherError::Closed)
    }
}

impl EventPublisher for ZmqPublisher {
    fn publish(&self, event: RealtimeEvent) {
        let message = ZmqRealtimeMessage {
            namespace: event.namespace,
            event: event.event,
            payload: event.payload,
        };

        let body = match serde_json::to_vec(&message) {
            Ok(body) => body,
            Err(err) => {
                log::error!("Failed to serialize realtime event {}: {err}", message.event);
                return;
            }
        };

        if let Err(err) = self.send_frames(vec![message.event.into_bytes(), body]) {
            log::error!("Failed to enqueue realtime event: {err}");
        }
    }
}
