//! Basic type definitions for the chat client
//!
//! Provides newtype wrappers for type safety:
//! - `ParticipantId`: opaque per-session participant identifier
//! - `RoomLabel`: name of the room a session joins

use serde::{Deserialize, Serialize};

/// Room joined when the user never picks one
pub const DEFAULT_ROOM: &str = "A";

/// Participant identifier (newtype pattern)
///
/// Generated once per session by an `IdentityGenerator` and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap an already generated identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room label
///
/// Selects which room a session joins. Taken verbatim from user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomLabel(String);

impl RoomLabel {
    /// Create a label from user input
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomLabel {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM)
    }
}

impl From<&str> for RoomLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for RoomLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl std::fmt::Display for RoomLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_label_default() {
        assert_eq!(RoomLabel::default().as_str(), "A");
    }

    #[test]
    fn test_room_label_kept_verbatim() {
        let label = RoomLabel::from("lobby b");
        assert_eq!(label.to_string(), "lobby b");
    }

    #[test]
    fn test_participant_id_serializes_as_plain_string() {
        let id = ParticipantId::new("18c2f0a1b2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"18c2f0a1b2\"");
    }
}
