use crate::domain::round::{Phase, Round, RoundEvent};

#[test]
fn new_round_is_empty_and_open() {
    let round = Round::new();
    assert_eq!(round.phase(), Phase::Empty);
    assert_eq!(round.task(), "");
    assert!(!round.is_closed());
    assert!(round.ledger().is_empty());
}

#[test]
fn start_emits_clear_then_flag_then_task() {
    let mut round = Round::new();
    let events = round.start("Story-12");

    assert_eq!(
        events,
        vec![
            RoundEvent::RoundCleared,
            RoundEvent::ClosedChanged { closed: false },
            RoundEvent::RoundOpened {
                task: "Story-12".to_string()
            },
        ]
    );
    assert_eq!(round.phase(), Phase::Open);
    assert_eq!(round.task(), "Story-12");
}

#[test]
fn start_wipes_the_previous_ledger() {
    let mut round = Round::new();
    round.start("Story-1");
    round.submit("Alice", 5.0);
    round.submit("Bob", 3.0);

    round.start("Story-2");
    assert!(round.ledger().is_empty());
    assert_eq!(round.task(), "Story-2");
}

#[test]
fn starting_with_an_empty_task_is_legal() {
    let mut round = Round::new();
    round.submit("Alice", 5.0);

    let events = round.start("");
    assert_eq!(round.phase(), Phase::Empty);
    assert!(round.ledger().is_empty());
    assert!(events.contains(&RoundEvent::RoundOpened {
        task: String::new()
    }));
}

#[test]
fn submit_while_open_inserts_and_emits() {
    let mut round = Round::new();
    round.start("Story-12");

    let events = round.submit("Alice", 5.0);
    assert_eq!(round.ledger().get("Alice"), Some(5.0));
    assert_eq!(events.len(), 2);

    match &events[0] {
        RoundEvent::LedgerUpdated { ledger } => {
            assert_eq!(ledger.get("Alice"), Some(5.0));
        }
        other => panic!("expected LedgerUpdated first, got {other:?}"),
    }
    match &events[1] {
        RoundEvent::ProgressChanged { names } => {
            assert_eq!(names, &vec!["Alice".to_string()]);
        }
        other => panic!("expected ProgressChanged second, got {other:?}"),
    }
}

#[test]
fn progress_never_carries_estimate_values() {
    let mut round = Round::new();
    round.start("Story-12");
    round.submit("Alice", 5.0);
    let events = round.submit("Bob", 3.0);

    let RoundEvent::ProgressChanged { names } = &events[1] else {
        panic!("expected ProgressChanged");
    };
    let rendered = serde_json::to_string(names).unwrap();
    assert_eq!(rendered, r#"["Alice","Bob"]"#);
}

#[test]
fn resubmission_keeps_ledger_size() {
    let mut round = Round::new();
    round.start("Story-12");
    round.submit("Alice", 5.0);
    round.submit("Alice", 8.0);

    assert_eq!(round.ledger().len(), 1);
    assert_eq!(round.ledger().get("Alice"), Some(8.0));
}

#[test]
fn submit_while_closed_is_a_silent_noop() {
    let mut round = Round::new();
    round.start("Story-12");
    round.submit("Alice", 5.0);
    round.close();

    let events = round.submit("Bob", 3.0);
    assert!(events.is_empty());
    assert_eq!(round.ledger().len(), 1);
    assert_eq!(round.ledger().get("Bob"), None);
}

#[test]
fn close_is_idempotent_but_reasserts_the_flag() {
    let mut round = Round::new();
    round.start("Story-12");

    assert_eq!(
        round.close(),
        vec![RoundEvent::ClosedChanged { closed: true }]
    );
    assert_eq!(
        round.close(),
        vec![RoundEvent::ClosedChanged { closed: true }]
    );
    assert!(round.is_closed());
}

#[test]
fn close_from_empty_is_legal() {
    // A round can be flagged closed with no task set; the flags are
    // independent, not derived from each other.
    let mut round = Round::new();
    round.close();

    assert!(round.is_closed());
    assert_eq!(round.phase(), Phase::Empty);

    // And the flag gates submissions even without a task
    assert!(round.submit("Alice", 5.0).is_empty());
    assert!(round.ledger().is_empty());
}

#[test]
fn reveal_emits_the_ledger_without_state_change() {
    let mut round = Round::new();
    round.start("Story-12");
    round.submit("Alice", 5.0);

    let before = round.clone();
    let events = round.reveal();

    assert_eq!(events.len(), 1);
    match &events[0] {
        RoundEvent::LedgerRevealed { ledger } => {
            assert_eq!(ledger.get("Alice"), Some(5.0));
        }
        other => panic!("expected LedgerRevealed, got {other:?}"),
    }
    assert_eq!(round.task(), before.task());
    assert_eq!(round.is_closed(), before.is_closed());
    assert_eq!(round.ledger(), before.ledger());
}

#[test]
fn reveal_from_empty_reveals_an_empty_ledger() {
    let round = Round::new();
    let events = round.reveal();
    assert_eq!(
        events,
        vec![RoundEvent::LedgerRevealed {
            ledger: Default::default()
        }]
    );
}

#[test]
fn clear_resets_everything_from_any_state() {
    let mut round = Round::new();
    round.start("Story-12");
    round.submit("Alice", 5.0);
    round.close();

    let events = round.clear();
    assert_eq!(events, vec![RoundEvent::RoundCleared]);
    assert_eq!(round.task(), "");
    assert!(!round.is_closed());
    assert!(round.ledger().is_empty());
    assert_eq!(round.phase(), Phase::Empty);
}

#[test]
fn full_session_walkthrough() {
    // start -> submit -> close -> rejected submit -> reveal -> clear
    let mut round = Round::new();

    round.start("Story-12");
    round.submit("Alice", 5.0);
    assert_eq!(round.ledger().get("Alice"), Some(5.0));

    round.close();
    round.submit("Bob", 3.0);
    assert_eq!(round.ledger().len(), 1);

    let reveal = round.reveal();
    let RoundEvent::LedgerRevealed { ledger } = &reveal[0] else {
        panic!("expected LedgerRevealed");
    };
    assert_eq!(ledger.get("Alice"), Some(5.0));

    round.clear();
    assert_eq!(round.phase(), Phase::Empty);
    assert!(!round.is_closed());
    assert!(round.ledger().is_empty());
}
