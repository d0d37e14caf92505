use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "retouch", version, about = "Turn visual edits into agent prompts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the edit prompt for an element's markup before and after an edit.
    Diff(DiffArgs),
    /// Replay a captured event stream and print the resulting transcript.
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// File holding the element's outer HTML before the edit.
    pub before: PathBuf,
    /// File holding the element's outer HTML after the edit.
    pub after: PathBuf,
    /// Structural locator of the edited element, e.g. `main > ul > li:nth-of-type(2)`.
    #[arg(long)]
    pub element_path: String,
    /// Page URL the element was edited on.
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Captured `text/event-stream` body.
    pub events: PathBuf,
    /// Session to scope the transcript to.
    #[arg(long)]
    pub session: Option<String>,
}
