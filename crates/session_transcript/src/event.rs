use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::TranscriptError;
use crate::schema::{MessageInfo, Part};

pub const MESSAGE_UPDATED: &str = "message.updated";
pub const MESSAGE_REMOVED: &str = "message.removed";
pub const MESSAGE_PART_UPDATED: &str = "message.part.updated";
pub const MESSAGE_PART_REMOVED: &str = "message.part.removed";

/// One inbound `{ type, properties }` event. Updates carry full records, not deltas.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    MessageUpdated {
        info: MessageInfo,
    },
    MessageRemoved {
        session_id: String,
        message_id: String,
    },
    PartUpdated {
        part: Part,
        /// Streaming text increment sent alongside the full part; informational only.
        delta: Option<String>,
    },
    PartRemoved {
        session_id: String,
        message_id: String,
        part_id: String,
    },
    /// Any other event type on the bus (session status, file watcher, ...).
    Unknown {
        event_type: String,
    },
}

#[derive(Deserialize)]
struct MessageUpdatedProperties {
    info: MessageInfo,
}

#[derive(Deserialize)]
struct MessageRemovedProperties {
    #[serde(rename = "sessionID")]
    session_id: String,
    #[serde(rename = "messageID")]
    message_id: String,
}

#[derive(Deserialize)]
struct PartUpdatedProperties {
    part: Part,
    #[serde(default)]
    delta: Option<String>,
}

#[derive(Deserialize)]
struct PartRemovedProperties {
    #[serde(rename = "sessionID")]
    session_id: String,
    #[serde(rename = "messageID")]
    message_id: String,
    #[serde(rename = "partID")]
    part_id: String,
}

impl TranscriptEvent {
    /// Decodes one event from its JSON text.
    pub fn from_json(input: &str) -> Result<Self, TranscriptError> {
        let value = serde_json::from_str::<Value>(input)?;
        Self::from_value(value)
    }

    /// Decodes one event envelope. Unknown types map to [`TranscriptEvent::Unknown`].
    pub fn from_value(mut value: Value) -> Result<Self, TranscriptError> {
        let event_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(TranscriptError::MissingType)?
            .to_string();
        let properties = value
            .get_mut("properties")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(match event_type.as_str() {
            MESSAGE_UPDATED => {
                let MessageUpdatedProperties { info } = decode(&event_type, properties)?;
                Self::MessageUpdated { info }
            }
            MESSAGE_REMOVED => {
                let MessageRemovedProperties {
                    session_id,
                    message_id,
                } = decode(&event_type, properties)?;
                Self::MessageRemoved {
                    session_id,
                    message_id,
                }
            }
            MESSAGE_PART_UPDATED => {
                let PartUpdatedProperties { part, delta } = decode(&event_type, properties)?;
                Self::PartUpdated { part, delta }
            }
            MESSAGE_PART_REMOVED => {
                let PartRemovedProperties {
                    session_id,
                    message_id,
                    part_id,
                } = decode(&event_type, properties)?;
                Self::PartRemoved {
                    session_id,
                    message_id,
                    part_id,
                }
            }
            _ => Self::Unknown { event_type },
        })
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::MessageUpdated { .. } => MESSAGE_UPDATED,
            Self::MessageRemoved { .. } => MESSAGE_REMOVED,
            Self::PartUpdated { .. } => MESSAGE_PART_UPDATED,
            Self::PartRemoved { .. } => MESSAGE_PART_REMOVED,
            Self::Unknown { event_type } => event_type,
        }
    }

    /// Session the event is scoped to, if it is a transcript event.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::MessageUpdated { info } => Some(&info.session_id),
            Self::PartUpdated { part, .. } => Some(&part.session_id),
            Self::MessageRemoved { session_id, .. } | Self::PartRemoved { session_id, .. } => {
                Some(session_id)
            }
            Self::Unknown { .. } => None,
        }
    }
}

fn decode<T: DeserializeOwned>(event_type: &str, properties: Value) -> Result<T, TranscriptError> {
    serde_json::from_value(properties).map_err(|source| TranscriptError::malformed(event_type, source))
}
