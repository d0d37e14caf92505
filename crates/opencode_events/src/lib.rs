//! Wire plumbing between the agent server and the transcript store.
//!
//! Owns SSE decoding of the `/event` stream, the pump that folds decoded events into a
//! [`session_transcript::TranscriptStore`], endpoint construction and the prompt request
//! body. No HTTP client lives here; callers hand the pump any byte-chunk stream.

pub mod config;
pub mod error;
pub mod payload;
pub mod sse;
pub mod subscription;
pub mod url;

pub use config::OpencodeConfig;
pub use error::EventStreamError;
pub use payload::{CreatedSession, ModelRef, PromptPart, PromptRequest};
pub use sse::SseStreamParser;
pub use subscription::{
    apply_sse_document, parse_sse_document, pump_events, CancellationSignal, PumpReport,
};
pub use crate::url::{event_url, prompt_async_url, session_url, DEFAULT_SERVER_URL};
