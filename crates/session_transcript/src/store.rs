use std::collections::HashMap;

use tracing::{debug, trace};

use crate::event::TranscriptEvent;
use crate::schema::{MessageInfo, Part};

/// One message and its parts in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    info: MessageInfo,
    parts: Vec<Part>,
    /// First-insert order, used to break creation-time ties.
    seq: u64,
}

impl MessageEntry {
    #[must_use]
    pub fn info(&self) -> &MessageInfo {
        &self.info
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[must_use]
    pub fn part(&self, part_id: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.id == part_id)
    }
}

/// Result of applying one event to a [`TranscriptStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    MessageInserted,
    MessageReplaced,
    MessageRemoved,
    PartInserted,
    PartReplaced,
    PartRemoved,
    Ignored(IgnoreReason),
}

impl Applied {
    /// True when the event changed store state.
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Why an event left the store untouched. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No conversation has started yet.
    NoSession,
    /// The event belongs to a session other than the current one.
    ForeignSession,
    /// A part update arrived before any `message.updated` for its message.
    OrphanPart,
    /// A removal targeted a message or part that is not present.
    MissingTarget,
    UnknownEvent,
}

/// Event-sourced transcript for the current conversation session.
///
/// Writes are gated on the current session id. Entries written under an earlier session
/// stay in the map but never surface through [`TranscriptStore::sorted_messages`].
#[derive(Debug, Clone, Default)]
pub struct TranscriptStore {
    messages: HashMap<String, MessageEntry>,
    session_id: Option<String>,
    next_seq: u64,
}

impl TranscriptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session_id: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set_session_id(session_id);
        store
    }

    /// Scopes all subsequent events and reads to `session_id`.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        let session_id = session_id.into();
        debug!(session_id = %session_id, "transcript session set");
        self.session_id = Some(session_id);
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Applies one event and reports what it did.
    pub fn apply(&mut self, event: TranscriptEvent) -> Applied {
        let event_type = event.event_type().to_string();
        let outcome = self.apply_inner(event);
        match outcome {
            Applied::Ignored(reason) => {
                debug!(event_type = %event_type, ?reason, "transcript event ignored");
            }
            applied => trace!(event_type = %event_type, ?applied, "transcript event applied"),
        }
        outcome
    }

    /// By-value reducer form of [`TranscriptStore::apply`].
    #[must_use]
    pub fn reduce(mut self, event: TranscriptEvent) -> Self {
        self.apply(event);
        self
    }

    fn apply_inner(&mut self, event: TranscriptEvent) -> Applied {
        let Some(current) = self.session_id.as_deref() else {
            return Applied::Ignored(IgnoreReason::NoSession);
        };
        if let Some(session_id) = event.session_id() {
            if session_id != current {
                return Applied::Ignored(IgnoreReason::ForeignSession);
            }
        }

        match event {
            TranscriptEvent::MessageUpdated { info } => self.upsert_message(info),
            TranscriptEvent::MessageRemoved {
                session_id,
                message_id,
            } => {
                let owned = self
                    .messages
                    .get(&message_id)
                    .is_some_and(|entry| entry.info.session_id == session_id);
                if owned {
                    self.messages.remove(&message_id);
                    Applied::MessageRemoved
                } else {
                    Applied::Ignored(IgnoreReason::MissingTarget)
                }
            }
            TranscriptEvent::PartUpdated { part, .. } => self.upsert_part(part),
            TranscriptEvent::PartRemoved {
                session_id,
                message_id,
                part_id,
            } => self.remove_part(&session_id, &message_id, &part_id),
            TranscriptEvent::Unknown { .. } => Applied::Ignored(IgnoreReason::UnknownEvent),
        }
    }

    fn upsert_message(&mut self, info: MessageInfo) -> Applied {
        if let Some(entry) = self.messages.get_mut(&info.id) {
            // An entry retained from an earlier session is superseded, not merged.
            if entry.info.session_id == info.session_id {
                entry.info = info;
                return Applied::MessageReplaced;
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.messages.insert(
            info.id.clone(),
            MessageEntry {
                info,
                parts: Vec::new(),
                seq,
            },
        );
        Applied::MessageInserted
    }

    fn upsert_part(&mut self, part: Part) -> Applied {
        let Some(entry) = self
            .messages
            .get_mut(&part.message_id)
            .filter(|entry| entry.info.session_id == part.session_id)
        else {
            return Applied::Ignored(IgnoreReason::OrphanPart);
        };

        match entry.parts.iter_mut().find(|existing| existing.id == part.id) {
            Some(existing) => {
                *existing = part;
                Applied::PartReplaced
            }
            None => {
                entry.parts.push(part);
                Applied::PartInserted
            }
        }
    }

    fn remove_part(&mut self, session_id: &str, message_id: &str, part_id: &str) -> Applied {
        let Some(entry) = self
            .messages
            .get_mut(message_id)
            .filter(|entry| entry.info.session_id == session_id)
        else {
            return Applied::Ignored(IgnoreReason::MissingTarget);
        };

        let before = entry.parts.len();
        entry.parts.retain(|part| part.id != part_id);
        if entry.parts.len() == before {
            Applied::Ignored(IgnoreReason::MissingTarget)
        } else {
            Applied::PartRemoved
        }
    }

    #[must_use]
    pub fn message(&self, message_id: &str) -> Option<&MessageEntry> {
        self.messages.get(message_id)
    }

    /// Number of stored entries across every session ever scoped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Current-session messages ordered by creation time, then by first arrival.
    ///
    /// Recomputed on every call; nothing is cached.
    #[must_use]
    pub fn sorted_messages(&self) -> Vec<&MessageEntry> {
        let Some(current) = self.session_id.as_deref() else {
            return Vec::new();
        };

        let mut entries: Vec<&MessageEntry> = self
            .messages
            .values()
            .filter(|entry| entry.info.session_id == current)
            .collect();
        entries.sort_by_key(|entry| (entry.info.time.created, entry.seq));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::{Applied, IgnoreReason, TranscriptStore};
    use crate::event::TranscriptEvent;
    use crate::schema::{MessageInfo, Part, PartKind, Role};

    fn message(id: &str, created: i64) -> TranscriptEvent {
        TranscriptEvent::MessageUpdated {
            info: MessageInfo::new(id, "s1", Role::User, created),
        }
    }

    fn text_part(id: &str, message_id: &str, text: &str) -> TranscriptEvent {
        TranscriptEvent::PartUpdated {
            part: Part::new(
                id,
                "s1",
                message_id,
                PartKind::Text {
                    text: text.to_string(),
                },
            ),
            delta: None,
        }
    }

    #[test]
    fn no_session_ignores_everything() {
        let mut store = TranscriptStore::new();
        assert_eq!(
            store.apply(message("m1", 1)),
            Applied::Ignored(IgnoreReason::NoSession)
        );
        assert!(store.is_empty());
        assert!(store.sorted_messages().is_empty());
    }

    #[test]
    fn outcomes_describe_each_transition() {
        let mut store = TranscriptStore::with_session("s1");
        assert_eq!(store.apply(message("m1", 1)), Applied::MessageInserted);
        assert_eq!(store.apply(message("m1", 1)), Applied::MessageReplaced);
        assert_eq!(store.apply(text_part("p1", "m1", "a")), Applied::PartInserted);
        assert_eq!(store.apply(text_part("p1", "m1", "b")), Applied::PartReplaced);
        assert_eq!(
            store.apply(TranscriptEvent::PartRemoved {
                session_id: "s1".to_string(),
                message_id: "m1".to_string(),
                part_id: "p1".to_string(),
            }),
            Applied::PartRemoved
        );
        assert_eq!(
            store.apply(TranscriptEvent::MessageRemoved {
                session_id: "s1".to_string(),
                message_id: "m1".to_string(),
            }),
            Applied::MessageRemoved
        );
        assert_eq!(
            store.apply(TranscriptEvent::Unknown {
                event_type: "session.idle".to_string()
            }),
            Applied::Ignored(IgnoreReason::UnknownEvent)
        );
    }

    #[test]
    fn equal_timestamps_keep_first_seen_order() {
        let store = TranscriptStore::with_session("s1")
            .reduce(message("b", 5))
            .reduce(message("a", 5))
            .reduce(message("c", 1))
            .reduce(message("b", 5));

        let ids: Vec<&str> = store
            .sorted_messages()
            .iter()
            .map(|entry| entry.info().id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn entries_kept_from_an_earlier_session_do_not_absorb_new_parts() {
        let mut store = TranscriptStore::with_session("s1")
            .reduce(message("m1", 1))
            .reduce(text_part("p1", "m1", "old"));
        store.set_session_id("s2");

        let reused_id = TranscriptEvent::PartUpdated {
            part: Part::new(
                "p2",
                "s2",
                "m1",
                PartKind::Text {
                    text: "new".to_string(),
                },
            ),
            delta: None,
        };
        assert_eq!(
            store.apply(reused_id.clone()),
            Applied::Ignored(IgnoreReason::OrphanPart)
        );
        assert_eq!(
            store.apply(TranscriptEvent::PartRemoved {
                session_id: "s2".to_string(),
                message_id: "m1".to_string(),
                part_id: "p1".to_string(),
            }),
            Applied::Ignored(IgnoreReason::MissingTarget)
        );

        assert_eq!(
            store.apply(TranscriptEvent::MessageUpdated {
                info: MessageInfo::new("m1", "s2", Role::User, 5),
            }),
            Applied::MessageInserted
        );
        assert_eq!(store.apply(reused_id), Applied::PartInserted);

        let sorted = store.sorted_messages();
        assert_eq!(sorted.len(), 1);
        let ids: Vec<&str> = sorted[0].parts().iter().map(|part| part.id.as_str()).collect();
        assert_eq!(ids, vec!["p2"]);
    }
}
