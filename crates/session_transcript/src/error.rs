use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("failed to parse event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event is missing a string `type` field")]
    MissingType,

    #[error("event `{event_type}` has malformed properties: {source}")]
    MalformedEvent {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TranscriptError {
    #[must_use]
    pub fn malformed(event_type: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedEvent {
            event_type: event_type.into(),
            source,
        }
    }
}
