//! Line commands read from stdin while the dashboard runs.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use dashboard_core::Msg;
use dashboard_logging::{dash_info, dash_warn};
use thiserror::Error;

pub const HELP: &str = "commands: cancel <job-id> | quit | help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Cancel { job_id: String },
    Quit,
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("cancel needs a job id")]
    MissingJobId,
    #[error("unknown command {0:?}")]
    Unknown(String),
}

/// Parse one input line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb.to_ascii_lowercase().as_str() {
        "cancel" | "remove" => {
            let job_id = words.next().ok_or(ConsoleError::MissingJobId)?;
            ConsoleCommand::Cancel {
                job_id: job_id.to_string(),
            }
        }
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        "help" | "?" => ConsoleCommand::Help,
        other => return Err(ConsoleError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

impl ConsoleCommand {
    fn into_msg(self) -> Option<Msg> {
        match self {
            ConsoleCommand::Cancel { job_id } => Some(Msg::CancelClicked { job_id }),
            ConsoleCommand::Quit => Some(Msg::QuitRequested),
            ConsoleCommand::Help => None,
        }
    }
}

/// Read commands from stdin on a background thread until EOF or until the
/// UI loop stops listening.
pub fn spawn_reader(msg_tx: mpsc::Sender<Msg>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("dashboard-console".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        dash_warn!("Console read failed: {}", err);
                        break;
                    }
                };
                match parse_command(&line) {
                    Ok(Some(command)) => match command.into_msg() {
                        Some(msg) => {
                            if msg_tx.send(msg).is_err() {
                                break;
                            }
                        }
                        None => println!("{HELP}"),
                    },
                    Ok(None) => {}
                    Err(err) => println!("{err}; {HELP}"),
                }
            }
            dash_info!("Console input closed");
        })
}
