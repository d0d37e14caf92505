//! Visual-edit diff engine.
//!
//! Turns an in-place edit of one rendered element into an agent instruction: a structural
//! locator for the element ([`element_path`]), a line-per-tag rendering of its markup
//! before and after ([`format_html`]), an exact line diff between the two
//! ([`diff_lines`], [`unified_diff`]), and the assembled prompt
//! ([`build_edit_diff_prompt`]).
//!
//! Everything here is a pure, total function: no input is rejected, and no call keeps state
//! between invocations. The engine has no DOM runtime dependency; hosts expose elements
//! through [`ElementLike`].

pub mod diff;
pub mod element;
pub mod format;
pub mod path;
pub mod prompt;

pub use diff::{diff_lines, unified_diff, DiffOp};
pub use element::{DomTree, ElementLike, ElementRef, NodeId, VOID_ELEMENTS};
pub use format::{format_html, format_html_lines};
pub use path::element_path;
pub use prompt::{build_edit_diff_prompt, build_selection_prompt, EDIT_INSTRUCTION, UNKNOWN_URL};
