//! Transport collaborator contract
//!
//! `ChatSession` never talks to the network. A transport connects to a room
//! and hands back an `Outbound` handle; the session posts each accepted
//! message to it and forgets about it. Delivery failures stay inside the
//! transport.
//!
//! `LoopbackTransport` is an in-process implementation over a tokio
//! unbounded channel: posted frames are queued as JSON and echoed to the
//! receive callbacks on `drain`.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::message::{Frame, Message};
use crate::types::RoomLabel;

/// Callback invoked for every frame received from the room
pub type ReceiveCallback = Box<dyn FnMut(Frame) + Send>;

/// Fire-and-forget send primitive of a connected transport
pub trait Outbound: Send {
    /// Attempt to deliver `message`. Never reports failure to the caller.
    fn post(&self, message: &Message);
}

/// Connection side of the transport contract
pub trait Transport {
    type Handle: Outbound + 'static;

    /// Connect to `room`, yielding a handle to post messages through
    fn connect(&mut self, room: &RoomLabel) -> Result<Self::Handle, TransportError>;

    /// Register a callback for incoming frames
    fn on_receive(&mut self, callback: ReceiveCallback);
}

/// In-process transport that echoes posted frames back to its listeners
pub struct LoopbackTransport {
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
    callbacks: Vec<ReceiveCallback>,
}

impl LoopbackTransport {
    /// Create an open transport with no listeners
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            callbacks: Vec::new(),
        }
    }

    /// Close the receiving side. Later connects fail and posts are dropped.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Hand every queued frame to the receive callbacks
    ///
    /// Returns the number of frames delivered. Undecodable frames are
    /// logged and skipped.
    pub fn drain(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(json) = self.rx.try_recv() {
            match Frame::decode(&json) {
                Ok(frame) => {
                    for callback in self.callbacks.iter_mut() {
                        callback(frame.clone());
                    }
                    delivered += 1;
                }
                Err(e) => {
                    warn!("Dropping undecodable frame: {}", e);
                }
            }
        }
        delivered
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for LoopbackTransport {
    type Handle = LoopbackHandle;

    fn connect(&mut self, room: &RoomLabel) -> Result<LoopbackHandle, TransportError> {
        if self.tx.is_closed() {
            return Err(TransportError::ChannelClosed);
        }
        if room.as_str().trim().is_empty() {
            return Err(TransportError::ConnectFailed("blank room label".to_string()));
        }
        debug!("Loopback connected to room {}", room);
        Ok(LoopbackHandle {
            room: room.clone(),
            tx: self.tx.clone(),
        })
    }

    fn on_receive(&mut self, callback: ReceiveCallback) {
        self.callbacks.push(callback);
    }
}

/// Outbound handle bound to one room of a `LoopbackTransport`
#[derive(Debug, Clone)]
pub struct LoopbackHandle {
    room: RoomLabel,
    tx: mpsc::UnboundedSender<String>,
}

impl LoopbackHandle {
    /// Room this handle posts to
    pub fn room(&self) -> &RoomLabel {
        &self.room
    }
}

impl Outbound for LoopbackHandle {
    fn post(&self, message: &Message) {
        let frame = Frame {
            room: self.room.clone(),
            message: message.clone(),
        };
        let json = match frame.encode() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode frame: {}", e);
                return;
            }
        };
        if self.tx.send(json).is_err() {
            warn!("Loopback closed, message to {} dropped", self.room);
        }
    }
}
