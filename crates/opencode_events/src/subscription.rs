use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use session_transcript::{Applied, TranscriptEvent, TranscriptStore};
use tracing::info;

use crate::error::EventStreamError;
use crate::sse::SseStreamParser;

/// Shared stop flag for a running subscription. Set it to end the pump at the next
/// chunk or event boundary.
pub type CancellationSignal = Arc<AtomicBool>;

/// What one pump run did to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub chunks: usize,
    pub events: usize,
    /// Events that changed the store.
    pub applied: usize,
    /// Events the store ignored (foreign session, orphan part, unknown type, ...).
    pub ignored: usize,
    /// True when the pump stopped because the signal was set, not because the stream ended.
    pub cancelled: bool,
}

impl PumpReport {
    /// Counts one applied or ignored event.
    pub fn record(&mut self, outcome: Applied) {
        self.events += 1;
        if outcome.changed() {
            self.applied += 1;
        } else {
            self.ignored += 1;
        }
    }
}

/// Feeds a byte-chunk stream through the SSE parser into `store` until the stream ends,
/// a chunk fails, or `cancellation` is set.
///
/// Events already applied stay applied when a later chunk fails.
pub async fn pump_events<S, B, E>(
    stream: S,
    cancellation: Option<&CancellationSignal>,
    store: &mut TranscriptStore,
) -> Result<PumpReport, EventStreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut parser = SseStreamParser::default();
    let mut report = PumpReport::default();

    info!(session_id = ?store.session_id(), "event subscription started");

    'chunks: loop {
        if is_cancelled(cancellation) {
            report.cancelled = true;
            break;
        }
        let Some(chunk) = stream.next().await else {
            break;
        };
        let chunk = chunk.map_err(EventStreamError::transport)?;
        report.chunks += 1;

        for event in parser.feed(chunk.as_ref()) {
            if is_cancelled(cancellation) {
                report.cancelled = true;
                break 'chunks;
            }
            report.record(store.apply(event));
        }
    }

    info!(
        events = report.events,
        applied = report.applied,
        cancelled = report.cancelled,
        "event subscription stopped"
    );
    Ok(report)
}

/// Replays a captured SSE log into `store` in one pass.
pub fn apply_sse_document(input: &str, store: &mut TranscriptStore) -> PumpReport {
    let mut report = PumpReport {
        chunks: 1,
        ..PumpReport::default()
    };
    for event in SseStreamParser::parse_frames(input) {
        report.record(store.apply(event));
    }
    report
}

/// Decodes a captured SSE log without applying it.
pub fn parse_sse_document(input: &str) -> Vec<TranscriptEvent> {
    SseStreamParser::parse_frames(input)
}

fn is_cancelled(cancellation: Option<&CancellationSignal>) -> bool {
    cancellation.is_some_and(|signal| signal.load(Ordering::Acquire))
}
