//! CLI handlers for managing the scrum list.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::scrum::DailyScrum;
use crate::store::ScrumStore;

use super::args::{AddCliArgs, EditCliArgs, RemoveCliArgs};
use super::find_scrum;

pub fn handle_list_command() -> Result<()> {
    let store = ScrumStore::open_default()?;
    let scrums = store.load()?;

    if scrums.is_empty() {
        println!("No scrums yet.");
        println!("Create one with: standup add \"Daily Standup\" --attendees Kim,Bill");
        return Ok(());
    }

    for scrum in &scrums {
        println!(
            "{} [{}] — {} min, {} attendee(s), {} meeting(s) recorded",
            scrum.title,
            scrum.color,
            scrum.length_in_minutes,
            scrum.attendees.len(),
            scrum.history.len(),
        );
        if !scrum.attendees.is_empty() {
            println!("  {}", scrum.attendees.join(", "));
        }
    }

    Ok(())
}

pub fn handle_add_command(args: AddCliArgs) -> Result<()> {
    let config = Config::load()?;
    let store = ScrumStore::open_default()?;
    let mut scrums = store.load()?;

    if find_scrum(&scrums, &args.title).is_ok() {
        bail!("A scrum named {:?} already exists", args.title);
    }

    let length = args
        .length
        .unwrap_or(config.meeting.default_length_minutes);
    let scrum = DailyScrum::new(
        args.title,
        args.attendees,
        length,
        args.color.unwrap_or_default(),
    );

    println!(
        "Added {:?} — {} min, {} attendee(s)",
        scrum.title,
        scrum.length_in_minutes,
        scrum.attendees.len()
    );

    scrums.push(scrum);
    store.save(&scrums)?;
    Ok(())
}

pub fn handle_edit_command(args: EditCliArgs) -> Result<()> {
    let store = ScrumStore::open_default()?;
    let mut scrums = store.load()?;
    let index = find_scrum(&scrums, &args.title)?;

    if let Some(rename) = &args.rename {
        if find_scrum(&scrums, rename).map(|i| i != index).unwrap_or(false) {
            bail!("A scrum named {:?} already exists", rename);
        }
    }

    let scrum = &mut scrums[index];
    if let Some(rename) = args.rename {
        scrum.title = rename;
    }
    if let Some(attendees) = args.attendees {
        scrum.attendees = attendees;
    }
    if let Some(length) = args.length {
        scrum.length_in_minutes = length;
    }
    if let Some(color) = args.color {
        scrum.color = color;
    }

    println!(
        "Updated {:?} — {} min, {} attendee(s)",
        scrum.title,
        scrum.length_in_minutes,
        scrum.attendees.len()
    );

    store.save(&scrums)?;
    Ok(())
}

pub fn handle_remove_command(args: RemoveCliArgs) -> Result<()> {
    let store = ScrumStore::open_default()?;
    let mut scrums = store.load()?;
    let index = find_scrum(&scrums, &args.title)?;

    let removed = scrums.remove(index);
    store.save(&scrums)?;

    println!(
        "Removed {:?} and {} recorded meeting(s)",
        removed.title,
        removed.history.len()
    );
    Ok(())
}
