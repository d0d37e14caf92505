//! Visual-edit bridge between a rendered page and a coding agent.
//!
//! The page side is the inspector: pick an element, edit it in place, and the edit is
//! turned into an agent prompt through [`edit_diff`]. The agent side is the transcript:
//! the server's event stream is decoded by [`opencode_events`] and folded into a
//! [`session_transcript::TranscriptStore`].
//!
//! This crate wires the two together with environment configuration, logging setup and
//! the [`InspectorContext`] state object.

pub mod config;
pub mod inspector;
pub mod logging;

pub use config::{ConfigError, EnvConfig};
pub use inspector::{InspectorContext, InspectorMode, Selection};
pub use logging::init_logging;

pub use edit_diff;
pub use opencode_events;
pub use session_transcript;
