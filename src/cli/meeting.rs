//! CLI handler for running a meeting.
//!
//! Runs the session in the foreground: speaker changes print as they
//! happen, Enter skips to the next speaker, `q` or Ctrl-C ends early.
//! The finished meeting is recorded on the scrum's history.

use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::chime::{Chime, SilentChime, TerminalBell};
use crate::config::Config;
use crate::session::{MeetingSession, SessionStatusHandle};
use crate::speech::NullRecognizer;
use crate::store::ScrumStore;

use super::args::RunCliArgs;
use super::find_scrum;

pub async fn handle_run_command(args: RunCliArgs) -> Result<()> {
    let config = Config::load()?;
    let store = ScrumStore::open_default()?;
    let mut scrums = store.load()?;
    let index = find_scrum(&scrums, &args.title)?;

    let mut meeting = scrums[index].clone();
    if let Some(length) = args.length {
        meeting.length_in_minutes = length;
    }

    let chime: Arc<dyn Chime> = if config.behavior.chime {
        Arc::new(TerminalBell)
    } else {
        Arc::new(SilentChime)
    };

    let status = SessionStatusHandle::default();
    let mut session = MeetingSession::new(
        &meeting,
        Arc::new(NullRecognizer),
        chime,
        status.clone(),
    );

    println!(
        "{} — {} minute(s), {} attendee(s)",
        meeting.title,
        meeting.length_in_minutes,
        meeting.attendees.len()
    );
    println!("Enter skips to the next speaker; q or Ctrl-C ends the meeting.\n");

    session.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut display = tokio::time::interval(Duration::from_millis(250));
    let mut last_speaker = String::new();

    loop {
        tokio::select! {
            _ = display.tick() => {
                if session.is_finished().await {
                    println!("Everyone has spoken.");
                    break;
                }
                let state = status.get().await;
                if state.active_speaker != last_speaker {
                    last_speaker = state.active_speaker.clone();
                    println!(
                        "{}  [{}]  {}s left in the meeting",
                        state.active_speaker,
                        state.progress_line(),
                        state.seconds_remaining,
                    );
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) => {
                        let input = input.trim();
                        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
                            break;
                        }
                        session.skip_speaker().await;
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    let history = session.end().await;
    println!(
        "Meeting over after {} minute(s). Recorded to history.",
        history.length_in_minutes
    );

    scrums[index].record_history(history);
    store.save(&scrums)?;
    Ok(())
}
