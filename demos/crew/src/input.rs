//! Stdin reader: turns typed lines into commands for the driver thread.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use cc_core::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Drop a new piece of dirt.
    Spawn(Point),
    Quit,
}

/// Parse one input line.  Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if matches!(line, "q" | "quit" | "exit") {
        return Some(Ok(Command::Quit));
    }
    Some(line.parse::<Point>().map(Command::Spawn).map_err(|e| e.to_string()))
}

/// Spawn the reader thread.  The channel disconnects when stdin closes.
pub fn spawn_stdin_reader() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    if let Err(e) = thread::Builder::new().name("stdin".into()).spawn(move || read_loop(tx)) {
        tracing::warn!(error = %e, "stdin reader unavailable");
    }
    rx
}

fn read_loop(tx: Sender<Command>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        match parse_line(&line) {
            None => {}
            Some(Ok(cmd)) => {
                if tx.send(cmd).is_err() || cmd == Command::Quit {
                    break;
                }
            }
            Some(Err(e)) => tracing::warn!(input = %line, error = %e, "ignoring input"),
        }
    }
    tracing::debug!("stdin closed");
}
