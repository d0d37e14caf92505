use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EventStreamError {
    #[error("event stream transport failed: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },

    #[error("invalid server base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("server base URL `{0}` cannot carry a path")]
    CannotBeABase(String),
}

impl EventStreamError {
    #[must_use]
    pub fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }
}
