use oppfinder::discover::types::{Opportunity, SearchResult, Source};
use oppfinder::tui::{AppStatus, Session};

fn opportunity(title: &str) -> Opportunity {
    Opportunity {
        title: title.to_string(),
        ..Default::default()
    }
}

fn source(title: &str, uri: &str) -> Source {
    Source {
        title: title.to_string(),
        uri: uri.to_string(),
    }
}

#[test]
fn error_path_clears_then_records_then_try_again() {
    let mut session = Session::new();
    assert_eq!(session.status(), AppStatus::Idle);

    // Seed a previous result so we can observe the clearing on submit.
    let warmup = session.begin();
    session.complete(
        warmup,
        SearchResult {
            opportunities: vec![opportunity("old")],
            sources: vec![source("Old", "https://old.example")],
        },
    );
    assert_eq!(session.status(), AppStatus::Complete);

    // Submit: Generating, stale display cleared.
    let seq = session.begin();
    assert_eq!(session.status(), AppStatus::Generating);
    assert!(session.opportunities().is_empty());
    assert!(session.sources().is_empty());
    assert!(session.error().is_none());

    // Provider rejects: Error with the message set.
    session.fail(seq, "Provider error: Rate limit exceeded".to_string());
    assert_eq!(session.status(), AppStatus::Error);
    assert_eq!(
        session.error(),
        Some("Provider error: Rate limit exceeded")
    );

    // "Try Again" returns to Idle and drops the message.
    session.reset();
    assert_eq!(session.status(), AppStatus::Idle);
    assert!(session.error().is_none());
}

#[test]
fn success_path_holds_exactly_the_delivered_result() {
    let mut session = Session::new();

    let seq = session.begin();
    assert_eq!(session.status(), AppStatus::Generating);

    session.complete(
        seq,
        SearchResult {
            opportunities: vec![opportunity("a"), opportunity("b"), opportunity("c")],
            sources: vec![
                source("S1", "https://s1.example"),
                source("S2", "https://s2.example"),
            ],
        },
    );

    assert_eq!(session.status(), AppStatus::Complete);
    assert_eq!(session.opportunities().len(), 3);
    assert_eq!(session.sources().len(), 2);
    assert_eq!(session.opportunities()[2].title, "c");
}

#[test]
fn complete_to_generating_cycles_without_a_terminal_state() {
    let mut session = Session::new();

    let first = session.begin();
    session.complete(first, SearchResult::default());
    assert_eq!(session.status(), AppStatus::Complete);

    // A new submit from Complete goes straight back to Generating.
    let second = session.begin();
    assert_eq!(session.status(), AppStatus::Generating);
    assert!(second > first);

    session.fail(second, "boom".to_string());
    session.reset();
    let third = session.begin();
    assert_eq!(session.status(), AppStatus::Generating);
    assert!(third > second);
}
