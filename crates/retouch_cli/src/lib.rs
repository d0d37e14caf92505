//! `retouch` command-line front end.
//!
//! - `retouch diff <before> <after> --element-path <path> [--url <url>]` prints the agent
//!   prompt for an edit captured as two markup files, or nothing when they are equal.
//! - `retouch replay <events> [--session <id>]` folds a captured `/event` SSE log into a
//!   transcript and prints it as plain text. Without `--session` the first transcript
//!   event's session is used.
//!
//! Environment variables are read through `retouch::EnvConfig`; logs go to stderr or
//! `RETOUCH_WRITE_LOG`.

pub mod cli;
pub mod commands;
pub mod render;
