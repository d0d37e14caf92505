//! Tracing subscriber setup.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`] once.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EnvConfig;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the global subscriber.
///
/// `RETOUCH_DEBUG=1` forces `debug`; otherwise `RUST_LOG` applies, falling back to `warn`.
/// Output goes to stderr, or is appended to `RETOUCH_WRITE_LOG` when set. A second call
/// leaves the first subscriber in place.
pub fn init_logging(config: &EnvConfig) -> io::Result<()> {
    let (writer, ansi) = match config.write_log.as_deref() {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter(config.debug))
        .with(fmt::layer().with_writer(writer).with_ansi(ansi).with_target(true))
        .try_init();
    Ok(())
}

fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use crate::config::EnvConfig;
    use opencode_events::ModelRef;

    fn config(write_log: Option<String>) -> EnvConfig {
        EnvConfig {
            debug: true,
            write_log,
            server_url: "http://127.0.0.1:4096".to_string(),
            directory: "targetsite".to_string(),
            model: ModelRef::new("opencode", "big-pickle"),
        }
    }

    #[test]
    fn log_file_is_created_and_repeat_init_is_harmless() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("retouch.log");

        init_logging(&config(Some(path.display().to_string()))).expect("first init");
        init_logging(&config(None)).expect("second init");

        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("missing").join("retouch.log");

        assert!(init_logging(&config(Some(path.display().to_string()))).is_err());
    }
}
