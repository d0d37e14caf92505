//! Session transcript synchronizer.
//!
//! Folds the agent's `message.*` event stream into a consistent, chronologically ordered
//! transcript for one conversation session. Events may arrive out of order, more than once,
//! or for sessions that are no longer current; the store never rejects them, it reports
//! what it did through [`Applied`].
//!
//! Store contract:
//! - a part is only stored once its message has been seen through `message.updated`;
//! - re-applying an update replaces in place and never duplicates;
//! - removing a message removes its parts, removing a part keeps sibling order;
//! - the sorted view is recomputed from the map on every read and is scoped to the current
//!   session.

mod error;
mod event;
mod schema;
mod store;
pub mod view;

pub use error::TranscriptError;
pub use event::{
    TranscriptEvent, MESSAGE_PART_REMOVED, MESSAGE_PART_UPDATED, MESSAGE_REMOVED,
    MESSAGE_UPDATED,
};
pub use schema::{
    MessageError, MessageInfo, MessageTime, Part, PartKind, PartTime, Role, ToolState,
    ToolStatus,
};
pub use store::{Applied, IgnoreReason, MessageEntry, TranscriptStore};
pub use view::{transcript_items, TranscriptItem};
