use opencode_events::{event_url, prompt_async_url, session_url, EventStreamError, OpencodeConfig};

#[test]
fn endpoints_join_onto_base() {
    let config = OpencodeConfig::new("http://localhost:4096/");

    assert_eq!(
        config.event_url().expect("event url").as_str(),
        "http://localhost:4096/event"
    );
    assert_eq!(
        config.session_url().expect("session url").as_str(),
        "http://localhost:4096/session?directory=targetsite"
    );
    assert_eq!(
        config.prompt_async_url("ses_1").expect("prompt url").as_str(),
        "http://localhost:4096/session/ses_1/prompt_async"
    );
}

#[test]
fn base_path_prefix_is_kept() {
    assert_eq!(
        event_url("https://proxy.example/agent").expect("event url").as_str(),
        "https://proxy.example/agent/event"
    );
}

#[test]
fn path_values_are_escaped() {
    assert_eq!(
        session_url("http://127.0.0.1:4096", "my site")
            .expect("session url")
            .as_str(),
        "http://127.0.0.1:4096/session?directory=my+site"
    );
    assert_eq!(
        prompt_async_url("http://127.0.0.1:4096", "a/b")
            .expect("prompt url")
            .as_str(),
        "http://127.0.0.1:4096/session/a%2Fb/prompt_async"
    );
}

#[test]
fn blank_base_falls_back_to_default_and_garbage_is_rejected() {
    assert_eq!(
        event_url("  ").expect("event url").as_str(),
        "http://127.0.0.1:4096/event"
    );
    assert!(matches!(
        event_url("not a url"),
        Err(EventStreamError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        event_url("mailto:someone@example.com"),
        Err(EventStreamError::CannotBeABase(_))
    ));
}
