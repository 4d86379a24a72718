//! Message records and the wire frame
//!
//! A `Message` is immutable once built. The transport carries messages
//! wrapped in a `Frame` encoded as JSON with Serde's tagged enums.

use serde::{Deserialize, Serialize};

use crate::types::{ParticipantId, RoomLabel};

/// Who a logged message is attributed to
///
/// The counterpart slot carries no id, so it can never collide with the
/// local participant's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum Sender {
    /// The local participant
    Participant { id: ParticipantId },
    /// The other party's slot in a two-person room
    Counterpart,
}

impl Sender {
    /// Check if this is the counterpart slot
    pub fn is_counterpart(&self) -> bool {
        matches!(self, Sender::Counterpart)
    }
}

/// One entry of the session log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    sender_name: String,
    text: String,
}

impl Message {
    /// Create a message; it cannot be changed afterwards
    pub fn new(sender: Sender, sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender,
            sender_name: sender_name.into(),
            text: text.into(),
        }
    }

    /// Get who the message is attributed to
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    /// Get the display name at send time
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Get the message body
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Transport envelope: a message tagged with the room it was sent in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub room: RoomLabel,
    pub message: Message,
}

impl Frame {
    /// Serialize to a JSON frame
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a JSON frame
    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
