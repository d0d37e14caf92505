use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Millisecond Unix timestamps carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTime {
    pub created: i64,
    /// Set once an assistant message has finished streaming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageError {
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl MessageError {
    /// Human-readable detail: `data.message` when it is a string, else the error name.
    #[must_use]
    pub fn message(&self) -> &str {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(self.name.as_str())
    }
}

/// Message metadata as delivered by `message.updated`. Replaced wholesale on each update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub role: Role,
    pub time: MessageTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
    /// Provider, model, cost and token fields the transcript does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageInfo {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        session_id: impl Into<String>,
        role: Role,
        created: i64,
    ) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            role,
            time: MessageTime {
                created,
                completed: None,
            },
            error: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn completed_at(mut self, completed: i64) -> Self {
        self.time.completed = Some(completed);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: MessageError) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.time.completed.is_some()
    }
}

/// One sub-unit of a message, addressed by `(message_id, id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    #[serde(rename = "messageID")]
    pub message_id: String,
    #[serde(flatten)]
    pub kind: PartKind,
}

impl Part {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        session_id: impl Into<String>,
        message_id: impl Into<String>,
        kind: PartKind,
    ) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            message_id: message_id.into(),
            kind,
        }
    }

    #[must_use]
    pub fn is_tool(&self) -> bool {
        matches!(self.kind, PartKind::Tool { .. })
    }
}

/// Typed part payload keyed by the wire `type` field.
///
/// Step markers, snapshots, patches, file attachments and any future part types decode as
/// [`PartKind::Other`]; the transcript keeps them for ordering but never renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PartKind {
    Text {
        text: String,
    },
    Reasoning {
        text: String,
        time: PartTime,
    },
    Tool {
        #[serde(rename = "callID")]
        call_id: String,
        tool: String,
        state: ToolState,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTime {
    pub start: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Pending,
    Running,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolState {
    #[must_use]
    pub fn new(status: ToolStatus) -> Self {
        Self {
            status,
            input: Value::Null,
            title: None,
            output: None,
            error: None,
        }
    }
}
