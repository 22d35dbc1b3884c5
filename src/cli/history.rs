//! CLI handler for browsing a scrum's meeting history.

use anyhow::{anyhow, Result};
use chrono::Local;

use crate::store::ScrumStore;

use super::args::HistoryCliArgs;
use super::find_scrum;

pub fn handle_history_command(args: HistoryCliArgs) -> Result<()> {
    let store = ScrumStore::open_default()?;
    let scrums = store.load()?;
    let scrum = &scrums[find_scrum(&scrums, &args.title)?];

    if let Some(id) = args.transcript {
        let entry = scrum
            .history
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| anyhow!("No meeting {} recorded for {:?}", id, scrum.title))?;

        println!(
            "{} — {} minute(s)",
            entry.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.length_in_minutes
        );
        if entry.transcript.is_empty() {
            println!("(no transcript)");
        } else {
            println!("{}", entry.transcript);
        }
        return Ok(());
    }

    if scrum.history.is_empty() {
        println!("No meetings recorded for {:?} yet.", scrum.title);
        return Ok(());
    }

    // Stored newest first.
    for entry in scrum.history.iter().take(args.limit) {
        println!(
            "{}  {} — {} minute(s), {} attendee(s)",
            entry.id,
            entry.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.length_in_minutes,
            entry.attendees.len(),
        );
    }

    println!(
        "\nTo read a transcript: standup history {:?} --transcript <ID>",
        scrum.title
    );
    Ok(())
}
