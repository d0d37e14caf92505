use url::Url;

use crate::error::EventStreamError;

/// Default base URL of a locally running agent server.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";

/// `GET {base}/event`
pub fn event_url(base: &str) -> Result<Url, EventStreamError> {
    join_segments(base, &["event"])
}

/// `POST {base}/session?directory=<dir>`
pub fn session_url(base: &str, directory: &str) -> Result<Url, EventStreamError> {
    let mut url = join_segments(base, &["session"])?;
    url.query_pairs_mut().append_pair("directory", directory);
    Ok(url)
}

/// `POST {base}/session/{id}/prompt_async`
pub fn prompt_async_url(base: &str, session_id: &str) -> Result<Url, EventStreamError> {
    join_segments(base, &["session", session_id, "prompt_async"])
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url, EventStreamError> {
    let base = if base.trim().is_empty() {
        DEFAULT_SERVER_URL
    } else {
        base.trim()
    };

    let mut url = Url::parse(base).map_err(|source| EventStreamError::InvalidBaseUrl {
        url: base.to_string(),
        source,
    })?;
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| EventStreamError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
