use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use edit_diff::{build_edit_diff_prompt, UNKNOWN_URL};
use opencode_events::{apply_sse_document, parse_sse_document, PumpReport};
use session_transcript::TranscriptStore;
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{DiffArgs, ReplayArgs};
use crate::render::render_transcript;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no transcript event in {path} names a session; pass --session", path = .path.display())]
    NoSession { path: PathBuf },
}

fn read_file(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the edit prompt, or `None` when the markup did not change.
pub fn run_diff(args: &DiffArgs) -> Result<Option<String>, CommandError> {
    let before = read_file(&args.before)?;
    let after = read_file(&args.after)?;

    if before == after {
        debug!("markup unchanged; no prompt");
        return Ok(None);
    }

    Ok(Some(build_edit_diff_prompt(
        &before,
        &after,
        &args.element_path,
        args.url.as_deref().unwrap_or(UNKNOWN_URL),
    )))
}

/// Folded transcript of a captured event log plus what the replay did.
#[derive(Debug)]
pub struct Replay {
    pub store: TranscriptStore,
    pub report: PumpReport,
}

pub fn run_replay(args: &ReplayArgs) -> Result<Replay, CommandError> {
    let document = read_file(&args.events)?;
    let session_id = match &args.session {
        Some(session_id) => session_id.clone(),
        None => parse_sse_document(&document)
            .iter()
            .find_map(|event| event.session_id())
            .map(ToString::to_string)
            .ok_or_else(|| CommandError::NoSession {
                path: args.events.clone(),
            })?,
    };

    let mut store = TranscriptStore::with_session(session_id);
    let report = apply_sse_document(&document, &mut store);
    info!(
        events = report.events,
        applied = report.applied,
        ignored = report.ignored,
        "replay finished"
    );

    Ok(Replay { store, report })
}

/// Replays and renders in one step.
pub fn replay_transcript(args: &ReplayArgs) -> Result<String, CommandError> {
    let replay = run_replay(args)?;
    Ok(render_transcript(&replay.store))
}
