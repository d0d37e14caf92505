use std::io::{self, Write};

use clap::Parser;
use retouch::{init_logging, EnvConfig};
use retouch_cli::cli::{Cli, Command};
use retouch_cli::commands::{replay_transcript, run_diff};

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = EnvConfig::from_env().map_err(io::Error::other)?;
    init_logging(&config)?;

    let output = match &cli.command {
        Command::Diff(args) => run_diff(args).map_err(io::Error::other)?,
        Command::Replay(args) => Some(replay_transcript(args).map_err(io::Error::other)?),
    };

    if let Some(output) = output {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{output}")?;
    }
    Ok(())
}
