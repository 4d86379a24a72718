//! Two-Party Turn-Alternating Chat Client Library
//!
//! The client-side session state machine for a minimal two-person chat
//! room: join a named room, exchange short messages with one counterpart,
//! leave.
//!
//! # Features
//! - Per-session participant ids (clock + random, hex)
//! - `Disconnected` / `Connected` membership state
//! - Append-only message log, cleared on leave
//! - Turn alternation between the local participant and the counterpart slot
//! - Fire-and-forget hand-off of accepted messages to a transport
//! - Terminal front end with slash commands
//!
//! # Architecture
//! - `ChatSession` owns all session state; every mutation goes through its
//!   operations and completes synchronously
//! - The network lives behind the `Transport` / `Outbound` traits;
//!   `LoopbackTransport` is an in-process stand-in
//! - `Console` is the rendering side: it parses input and draws the log
//!
//! # Example
//! ```
//! use duo_chat::{ChatSession, ClockRandomGenerator};
//!
//! let mut session = ChatSession::new(&ClockRandomGenerator);
//! session.set_display_name("Alice");
//! session.join("A");
//! session.send("hi");
//! session.send("yo");
//! assert_eq!(session.log().len(), 2);
//! assert!(session.log()[1].sender().is_counterpart());
//! session.leave();
//! assert!(session.log().is_empty());
//! ```

pub mod console;
pub mod error;
pub mod identity;
pub mod message;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use console::{Command, Console, Flow};
pub use error::{AppError, CommandError, TransportError};
pub use identity::{ClockRandomGenerator, IdentityGenerator};
pub use message::{Frame, Message, Sender};
pub use session::{ChatSession, ConnectionState, Slot};
pub use transport::{LoopbackHandle, LoopbackTransport, Outbound, Transport};
pub use types::{ParticipantId, RoomLabel, DEFAULT_ROOM};
