//! Error types for the chat client
//!
//! Session operations never fail; these cover the transport collaborator,
//! console input, and the binary. Uses thiserror for ergonomic error
//! definitions.

use thiserror::Error;

/// Application-level errors (binary only)
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the console (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport errors
///
/// Reported through the transport's own channel; `ChatSession` never
/// sees them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not establish a connection to the room
    #[error("Connect failed: {0}")]
    ConnectFailed(String),

    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}

/// Console input errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Slash command nobody knows
    #[error("Unknown command: /{0}")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}
