use url::Url;

use crate::error::EventStreamError;
use crate::payload::ModelRef;
use crate::url::{event_url, prompt_async_url, session_url, DEFAULT_SERVER_URL};

pub const DEFAULT_DIRECTORY: &str = "targetsite";
pub const DEFAULT_PROVIDER_ID: &str = "opencode";
pub const DEFAULT_MODEL_ID: &str = "big-pickle";

/// Where the agent server lives and what each new session is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpencodeConfig {
    pub base_url: String,
    /// Project directory sessions are created in.
    pub directory: String,
    pub model: ModelRef,
}

impl Default for OpencodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
            model: ModelRef::new(DEFAULT_PROVIDER_ID, DEFAULT_MODEL_ID),
        }
    }
}

impl OpencodeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_model(mut self, model: ModelRef) -> Self {
        self.model = model;
        self
    }

    pub fn event_url(&self) -> Result<Url, EventStreamError> {
        event_url(&self.base_url)
    }

    pub fn session_url(&self) -> Result<Url, EventStreamError> {
        session_url(&self.base_url, &self.directory)
    }

    pub fn prompt_async_url(&self, session_id: &str) -> Result<Url, EventStreamError> {
        prompt_async_url(&self.base_url, session_id)
    }
}
