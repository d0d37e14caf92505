use session_transcript::TranscriptEvent;
use tracing::warn;

/// Incremental parser for the agent server's `/event` SSE stream.
///
/// Bytes are buffered until a frame is complete, so a UTF-8 sequence split across
/// transport chunks decodes intact.
#[derive(Debug, Default)]
pub struct SseStreamParser {
    buffer: Vec<u8>,
}

impl SseStreamParser {
    /// Feed arbitrary bytes into the parser and drain complete events.
    ///
    /// Frames whose payload is not a decodable event are logged and skipped; the stream
    /// keeps going.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<TranscriptEvent> {
        self.buffer.extend_from_slice(bytes);
        let mut events = Vec::new();

        while let Some((end, separator_len)) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + separator_len).take(end).collect();
            let frame = String::from_utf8_lossy(&frame);

            let Some(payload) = extract_data_payload(&frame) else {
                continue;
            };

            match TranscriptEvent::from_json(&payload) {
                Ok(event) => events.push(event),
                Err(error) => warn!(%error, "skipping malformed event frame"),
            }
        }

        events
    }

    /// Parse a complete SSE payload string in one shot.
    pub fn parse_frames(input: &str) -> Vec<TranscriptEvent> {
        let mut parser = Self::default();
        parser.feed(input.as_bytes())
    }

    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.iter().all(u8::is_ascii_whitespace)
    }
}

/// Offset and length of the first blank-line frame separator (`\n\n` or `\r\n\r\n`).
fn find_frame_end(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|window| window == b"\n\n");
    let crlf = buffer.windows(4).position(|window| window == b"\r\n\r\n");
    match (lf, crlf) {
        (Some(lf), Some(crlf)) if crlf < lf => Some((crlf, 4)),
        (Some(lf), _) => Some((lf, 2)),
        (None, Some(crlf)) => Some((crlf, 4)),
        (None, None) => None,
    }
}

fn extract_data_payload(frame: &str) -> Option<String> {
    let data_lines: Vec<&str> = frame
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}
