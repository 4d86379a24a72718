//! Two-Party Chat Client - Entry Point
//!
//! Creates one session, wires it to a loopback transport, and drives it
//! from stdin.

use std::env;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use duo_chat::{
    AppError, ChatSession, ClockRandomGenerator, Console, Flow, LoopbackTransport, Transport,
    DEFAULT_ROOM,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=duo_chat=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duo_chat=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Optional display name and room from the command line
    let name = env::args().nth(1).unwrap_or_default();
    let room = env::args().nth(2).unwrap_or_else(|| DEFAULT_ROOM.to_string());

    let mut session = ChatSession::new(&ClockRandomGenerator);
    session.set_display_name(name);
    session.set_room_label(room);
    info!("Session {} ready", session.self_id());

    let mut transport = LoopbackTransport::new();
    transport.on_receive(Box::new(|frame| {
        debug!(
            "Echo in room {}: {}: {}",
            frame.room,
            frame.message.sender_name(),
            frame.message.text()
        );
    }));

    let mut console = Console::new(session, transport);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    {
        let mut out = std::io::stdout().lock();
        writeln!(out, "/name <n>, /room <r>, /join [r], /leave, /clear, /draft <t>, /send, /log, /quit")?;
        console.render(&mut out)?;
    }

    while let Some(line) = lines.next_line().await? {
        let flow = {
            let mut out = std::io::stdout().lock();
            let flow = console.handle_line(&line, &mut out)?;
            out.flush()?;
            flow
        };
        console.transport_mut().drain();

        if flow == Flow::Quit {
            break;
        }
    }

    info!("Client shutting down");
    Ok(())
}
