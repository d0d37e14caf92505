//! Environment configuration.

use std::env;

use opencode_events::config::{DEFAULT_DIRECTORY, DEFAULT_MODEL_ID, DEFAULT_PROVIDER_ID};
use opencode_events::{ModelRef, OpencodeConfig, DEFAULT_SERVER_URL};
use thiserror::Error;

pub const DEBUG_VAR: &str = "RETOUCH_DEBUG";
pub const WRITE_LOG_VAR: &str = "RETOUCH_WRITE_LOG";
pub const SERVER_URL_VAR: &str = "RETOUCH_OPENCODE_URL";
pub const DIRECTORY_VAR: &str = "RETOUCH_DIRECTORY";
pub const MODEL_VAR: &str = "RETOUCH_MODEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must look like `provider:model`, got `{value}`")]
    InvalidModel { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub debug: bool,
    pub write_log: Option<String>,
    pub server_url: String,
    pub directory: String,
    pub model: ModelRef,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let model = match env_string_opt(MODEL_VAR) {
            Some(value) => ModelRef::parse(&value).ok_or(ConfigError::InvalidModel {
                var: MODEL_VAR,
                value,
            })?,
            None => ModelRef::new(DEFAULT_PROVIDER_ID, DEFAULT_MODEL_ID),
        };

        Ok(Self {
            debug: env_flag(DEBUG_VAR),
            write_log: env_string_opt(WRITE_LOG_VAR),
            server_url: env_string_opt(SERVER_URL_VAR)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            directory: env_string_opt(DIRECTORY_VAR)
                .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string()),
            model,
        })
    }

    /// Agent server settings derived from this environment.
    pub fn opencode_config(&self) -> OpencodeConfig {
        OpencodeConfig::new(self.server_url.clone())
            .with_directory(self.directory.clone())
            .with_model(self.model.clone())
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
