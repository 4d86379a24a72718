//! Terminal front end
//!
//! Turns input lines into `Command`s, applies them to a `ChatSession`
//! through a `Transport`, and renders the log. Holds no state of its own
//! beyond the session and transport it drives.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::error::{CommandError, TransportError};
use crate::message::{Message, Sender};
use crate::session::ChatSession;
use crate::transport::Transport;
use crate::types::RoomLabel;

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/name <name>`: set the display name
    Name(String),
    /// `/room <label>`: pick the room for the next join
    Room(String),
    /// `/join [label]`: join the given room, or the selected one
    Join(Option<String>),
    /// `/leave`
    Leave,
    /// `/clear`: drop the log, stay in the room
    Clear,
    /// `/draft <text>`: replace the unsent draft
    Draft(String),
    /// `/send` or an empty line: send the draft
    SendDraft,
    /// `/log`: print the log again
    Log,
    /// `/quit`
    Quit,
    /// Any line not starting with `/`
    Say(String),
}

impl Command {
    /// Parse one input line (without its trailing newline)
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(Command::SendDraft);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Say(line.to_string()));
        };

        let (word, arg) = match rest.split_once(' ') {
            Some((word, arg)) => (word, arg.trim()),
            None => (rest, ""),
        };
        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(arg.to_string())
            }
        };

        match word {
            "name" => required("name").map(Command::Name),
            "room" => required("room").map(Command::Room),
            "join" => Ok(Command::Join((!arg.is_empty()).then(|| arg.to_string()))),
            "leave" => Ok(Command::Leave),
            "clear" => Ok(Command::Clear),
            "draft" => Ok(Command::Draft(arg.to_string())),
            "send" => Ok(Command::SendDraft),
            "log" => Ok(Command::Log),
            "quit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a session from console commands
pub struct Console<T: Transport> {
    session: ChatSession,
    transport: T,
}

impl<T: Transport> Console<T> {
    /// Create a console driving `session` over `transport`
    pub fn new(session: ChatSession, transport: T) -> Self {
        Self { session, transport }
    }

    /// Get the driven session (read-only)
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Get the transport, e.g. to drain received frames
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Apply a command
    ///
    /// Only a failed connect on `/join` is reported; the session stays
    /// disconnected in that case.
    pub fn apply(&mut self, command: Command) -> Result<Flow, TransportError> {
        match command {
            Command::Name(name) => self.session.set_display_name(name),
            Command::Room(room) => self.session.set_room_label(room),
            Command::Join(room) => {
                let room = room
                    .map(RoomLabel::from)
                    .unwrap_or_else(|| self.session.room_label().clone());
                let handle = self.transport.connect(&room)?;
                self.session.join(room);
                self.session.attach_outbound(Box::new(handle));
            }
            Command::Leave => self.session.leave(),
            Command::Clear => self.session.clear(),
            Command::Draft(text) => self.session.set_pending_text(text),
            Command::SendDraft => self.session.send_pending(),
            Command::Say(text) => self.session.send(text),
            Command::Log => {}
            Command::Quit => {
                self.session.leave();
                info!("Console quitting");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Parse and apply one line, writing any problem to `out`
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "! {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        let redraw = matches!(
            command,
            Command::Say(_) | Command::SendDraft | Command::Clear | Command::Leave | Command::Log
        );

        match self.apply(command) {
            Ok(Flow::Quit) => return Ok(Flow::Quit),
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!("Join failed: {}", e);
                writeln!(out, "! {}", e)?;
            }
        }
        if redraw {
            self.render(out)?;
        }
        Ok(Flow::Continue)
    }

    /// Write the status line and the whole log
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let status = if self.session.is_connected() {
            format!("room {}", self.session.room_label())
        } else {
            "not in a room".to_string()
        };
        writeln!(out, "-- {} ({} messages) --", status, self.session.log().len())?;
        for message in self.session.log() {
            writeln!(out, "{}", render_message(message))?;
        }
        Ok(())
    }
}

/// Format one log entry, marking which slot it occupies
pub fn render_message(message: &Message) -> String {
    let slot = match message.sender() {
        Sender::Participant { .. } => "me",
        Sender::Counterpart => "them",
    };
    let name = if message.sender_name().is_empty() {
        "anonymous"
    } else {
        message.sender_name()
    };
    format!("[{}] {}: {}", slot, name, message.text())
}
