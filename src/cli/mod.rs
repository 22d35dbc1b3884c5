use anyhow::{anyhow, Result};

use crate::scrum::DailyScrum;

pub mod args;
mod history;
mod meeting;
mod scrums;

pub use args::{Cli, CliCommand};
pub use history::handle_history_command;
pub use meeting::handle_run_command;
pub use scrums::{
    handle_add_command, handle_edit_command, handle_list_command, handle_remove_command,
};

/// Look up a scrum by title, case-insensitively.
fn find_scrum(scrums: &[DailyScrum], title: &str) -> Result<usize> {
    scrums
        .iter()
        .position(|s| s.title.eq_ignore_ascii_case(title))
        .ok_or_else(|| anyhow!("No scrum named {:?}. See: standup list", title))
}
