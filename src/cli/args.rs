use clap::{Args as ClapArgs, Parser, Subcommand};
use uuid::Uuid;

use crate::scrum::ScrumColor;

#[derive(Parser, Debug)]
#[command(name = "standup")]
#[command(about = "Daily scrum meetings in the terminal", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List configured scrums
    List,
    /// Add a new scrum
    Add(AddCliArgs),
    /// Edit an existing scrum
    Edit(EditCliArgs),
    /// Remove a scrum and its history
    Remove(RemoveCliArgs),
    /// Run a meeting for a scrum
    Run(RunCliArgs),
    /// Show a scrum's meeting history
    History(HistoryCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct AddCliArgs {
    /// Title of the new scrum
    pub title: String,
    /// Attendees, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub attendees: Vec<String>,
    /// Meeting length in minutes (defaults from config)
    #[arg(short, long)]
    pub length: Option<u64>,
    /// Display color as #rrggbb
    #[arg(short, long)]
    pub color: Option<ScrumColor>,
}

#[derive(ClapArgs, Debug)]
pub struct EditCliArgs {
    /// Title of the scrum to edit
    pub title: String,
    /// New title
    #[arg(long)]
    pub rename: Option<String>,
    /// Replace the attendee list, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub attendees: Option<Vec<String>>,
    /// New meeting length in minutes
    #[arg(short, long)]
    pub length: Option<u64>,
    /// New display color as #rrggbb
    #[arg(short, long)]
    pub color: Option<ScrumColor>,
}

#[derive(ClapArgs, Debug)]
pub struct RemoveCliArgs {
    /// Title of the scrum to remove
    pub title: String,
}

#[derive(ClapArgs, Debug)]
pub struct RunCliArgs {
    /// Title of the scrum to run a meeting for
    pub title: String,
    /// Override the meeting length for this session only
    #[arg(short, long)]
    pub length: Option<u64>,
}

#[derive(ClapArgs, Debug)]
pub struct HistoryCliArgs {
    /// Title of the scrum
    pub title: String,
    /// Maximum number of meetings to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
    /// Print the full transcript of one meeting by its id
    #[arg(short, long)]
    pub transcript: Option<Uuid>,
}
