//! ChatSession state machine
//!
//! One client's local view of a two-party room: membership, the message
//! log, and whose slot the next message lands in. Every operation runs to
//! completion synchronously; the transport is only ever handed finished
//! messages.

use tracing::{debug, info};

use crate::identity::IdentityGenerator;
use crate::message::{Message, Sender};
use crate::transport::Outbound;
use crate::types::{ParticipantId, RoomLabel};

/// Room membership state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// Whose slot the next accepted message occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    /// The local participant
    #[default]
    Own,
    /// The other party
    Counterpart,
}

impl Slot {
    /// Get the other slot
    pub fn flipped(self) -> Self {
        match self {
            Slot::Own => Slot::Counterpart,
            Slot::Counterpart => Slot::Own,
        }
    }
}

/// Client-side chat session
///
/// Created once per UI session with a freshly generated id. Cycles between
/// `Disconnected` and `Connected` any number of times.
pub struct ChatSession {
    self_id: ParticipantId,
    display_name: String,
    room_label: RoomLabel,
    state: ConnectionState,
    log: Vec<Message>,
    pending_text: String,
    turn: Slot,
    outbound: Option<Box<dyn Outbound>>,
}

impl ChatSession {
    /// Create a disconnected session with an id from `generator`
    pub fn new(generator: &dyn IdentityGenerator) -> Self {
        let self_id = generator.generate();
        debug!("Session created with id {}", self_id);
        Self {
            self_id,
            display_name: String::new(),
            room_label: RoomLabel::default(),
            state: ConnectionState::Disconnected,
            log: Vec::new(),
            pending_text: String::new(),
            turn: Slot::Own,
            outbound: None,
        }
    }

    /// Get this participant's id, fixed for the session's lifetime
    pub fn self_id(&self) -> &ParticipantId {
        &self.self_id
    }

    /// Get the name attached to outgoing messages
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Set the display name
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    /// Get the selected room
    pub fn room_label(&self) -> &RoomLabel {
        &self.room_label
    }

    /// Select the room for the next join
    pub fn set_room_label(&mut self, room: impl Into<RoomLabel>) {
        self.room_label = room.into();
    }

    /// Get the unsent draft
    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    /// Replace the unsent draft
    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    /// Get the connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Check if the session is in a room
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Messages in display order
    pub fn log(&self) -> &[Message] {
        &self.log
    }

    /// Get the slot the next accepted message lands in
    pub fn turn(&self) -> Slot {
        self.turn
    }

    /// Check if the next accepted message is attributed to this participant
    pub fn turn_is_self(&self) -> bool {
        self.turn == Slot::Own
    }

    /// Attach the send primitive of a connected transport
    ///
    /// Accepted sends are posted to it until `leave`.
    pub fn attach_outbound(&mut self, outbound: Box<dyn Outbound>) {
        self.outbound = Some(outbound);
    }

    /// Check if a transport handle is attached
    pub fn has_outbound(&self) -> bool {
        self.outbound.is_some()
    }

    /// Join `room`
    ///
    /// Allowed while already connected. Leaves the log and turn alone.
    pub fn join(&mut self, room: impl Into<RoomLabel>) {
        self.room_label = room.into();
        self.state = ConnectionState::Connected;
        info!("Session {} joined room {}", self.self_id, self.room_label);
    }

    /// Append `text` to the log in the current turn's slot
    ///
    /// Silently ignored while disconnected.
    pub fn send(&mut self, text: impl Into<String>) {
        if !self.is_connected() {
            debug!("Send ignored, session {} is disconnected", self.self_id);
            return;
        }

        let sender = match self.turn {
            Slot::Own => Sender::Participant {
                id: self.self_id.clone(),
            },
            Slot::Counterpart => Sender::Counterpart,
        };
        let message = Message::new(sender, self.display_name.clone(), text);

        if let Some(outbound) = &self.outbound {
            outbound.post(&message);
        }

        debug!(
            "Session {} appended message #{} as {:?}",
            self.self_id,
            self.log.len() + 1,
            self.turn
        );
        self.log.push(message);
        self.turn = self.turn.flipped();
        self.pending_text.clear();
    }

    /// Send the current draft
    pub fn send_pending(&mut self) {
        let text = self.pending_text.clone();
        self.send(text);
    }

    /// Leave the room, dropping the log, the draft and the transport handle
    ///
    /// Idempotent.
    pub fn leave(&mut self) {
        if self.is_connected() {
            info!("Session {} left room {}", self.self_id, self.room_label);
        }
        self.state = ConnectionState::Disconnected;
        self.pending_text.clear();
        self.log.clear();
        self.outbound = None;
    }

    /// Drop the log without leaving the room
    pub fn clear(&mut self) {
        debug!("Session {} cleared {} messages", self.self_id, self.log.len());
        self.log.clear();
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("self_id", &self.self_id)
            .field("display_name", &self.display_name)
            .field("room_label", &self.room_label)
            .field("state", &self.state)
            .field("log", &self.log)
            .field("pending_text", &self.pending_text)
            .field("turn", &self.turn)
            .field("outbound", &self.outbound.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct FixedId(&'static str);

    impl IdentityGenerator for FixedId {
        fn generate(&self) -> ParticipantId {
            ParticipantId::new(self.0)
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Message>>>);

    impl Outbound for Recorder {
        fn post(&self, message: &Message) {
            self.0.lock().unwrap().push(message.clone());
        }
    }

    fn session() -> ChatSession {
        let mut session = ChatSession::new(&FixedId("me"));
        session.set_display_name("Alice");
        session
    }

    #[test]
    fn test_session_creation() {
        let session = session();

        assert_eq!(session.self_id().as_str(), "me");
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(session.room_label().as_str(), "A");
        assert!(session.log().is_empty());
        assert!(session.pending_text().is_empty());
        assert!(session.turn_is_self());
        assert!(!session.has_outbound());
    }

    #[test]
    fn test_join_send_leave_scenario() {
        let mut session = session();

        session.join("A");
        assert!(session.is_connected());

        session.send("hi");
        assert_eq!(session.log().len(), 1);
        assert_eq!(
            session.log()[0].sender(),
            &Sender::Participant {
                id: ParticipantId::new("me")
            }
        );
        assert_eq!(session.log()[0].text(), "hi");
        assert!(!session.turn_is_self());

        session.send("yo");
        assert_eq!(session.log().len(), 2);
        assert!(session.log()[1].sender().is_counterpart());
        assert_eq!(session.log()[1].sender_name(), "Alice");
        assert!(session.turn_is_self());

        session.leave();
        assert!(session.log().is_empty());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_send_while_disconnected_is_noop() {
        let mut session = session();
        session.set_pending_text("draft");

        session.send("x");

        assert!(session.log().is_empty());
        assert_eq!(session.pending_text(), "draft");
        assert!(session.turn_is_self());
    }

    #[test]
    fn test_turn_parity_over_many_sends() {
        let mut session = session();
        session.join("A");

        for n in 1..=7 {
            session.send(format!("m{}", n));
            assert_eq!(session.log().len(), n);
            assert_eq!(session.turn_is_self(), n % 2 == 0);
        }

        // Insertion order is display order, slots alternate.
        for (i, message) in session.log().iter().enumerate() {
            assert_eq!(message.text(), format!("m{}", i + 1));
            assert_eq!(message.sender().is_counterpart(), i % 2 == 1);
        }
    }

    #[test]
    fn test_identical_messages_not_deduplicated() {
        let mut session = session();
        session.join("A");
        session.send("same");
        session.send("same");
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_send_clears_pending() {
        let mut session = session();
        session.join("A");
        session.set_pending_text("typing...");
        session.send("hello");
        assert!(session.pending_text().is_empty());
    }

    #[test]
    fn test_send_pending() {
        let mut session = session();
        session.join("A");
        session.set_pending_text("from draft");

        session.send_pending();

        assert_eq!(session.log()[0].text(), "from draft");
        assert!(session.pending_text().is_empty());
        assert!(!session.turn_is_self());
    }

    #[test]
    fn test_leave_idempotent() {
        let mut session = session();
        session.join("A");
        session.send("hi");
        session.set_pending_text("unsent");

        session.leave();
        session.leave();

        assert!(session.log().is_empty());
        assert!(session.pending_text().is_empty());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_leave_keeps_turn() {
        let mut session = session();
        session.join("A");
        session.send("hi");

        session.leave();
        session.join("B");
        session.send("again");

        assert!(session.log()[0].sender().is_counterpart());
        assert_eq!(session.room_label().as_str(), "B");
    }

    #[test]
    fn test_clear_keeps_other_state() {
        let mut session = session();
        session.join("A");
        session.send("hi");
        session.set_pending_text("draft");

        session.clear();

        assert!(session.log().is_empty());
        assert!(session.is_connected());
        assert!(!session.turn_is_self());
        assert_eq!(session.pending_text(), "draft");
    }

    #[test]
    fn test_clear_while_disconnected() {
        let mut session = session();
        session.clear();
        assert!(session.log().is_empty());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_rejoin_keeps_log_and_turn() {
        let mut session = session();
        session.join("A");
        session.send("hi");

        session.join("A");

        assert_eq!(session.log().len(), 1);
        assert!(!session.turn_is_self());
    }

    #[test]
    fn test_outbound_receives_accepted_sends() {
        let recorder = Recorder::default();
        let mut session = session();
        session.attach_outbound(Box::new(recorder.clone()));

        session.send("dropped");
        session.join("A");
        session.send("hi");
        session.send("yo");

        let posted = recorder.0.lock().unwrap();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted.as_slice(), session.log());
    }

    #[test]
    fn test_leave_detaches_outbound() {
        let recorder = Recorder::default();
        let mut session = session();
        session.join("A");
        session.attach_outbound(Box::new(recorder.clone()));

        session.leave();
        session.join("A");
        session.send("after");

        assert!(!session.has_outbound());
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
