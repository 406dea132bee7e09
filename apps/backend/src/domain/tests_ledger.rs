use crate::domain::ledger::Ledger;

#[test]
fn first_submission_order_is_preserved() {
    let mut ledger = Ledger::new();
    ledger.insert("Alice", 5.0);
    ledger.insert("Bob", 3.0);
    ledger.insert("Carol", 8.0);

    assert_eq!(ledger.names(), vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn resubmission_overwrites_in_place() {
    let mut ledger = Ledger::new();
    ledger.insert("Alice", 5.0);
    ledger.insert("Bob", 3.0);
    ledger.insert("Alice", 13.0);

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.get("Alice"), Some(13.0));
    // Alice keeps her original position in the progress view
    assert_eq!(ledger.names(), vec!["Alice", "Bob"]);
}

#[test]
fn clear_empties_the_ledger() {
    let mut ledger = Ledger::new();
    ledger.insert("Alice", 5.0);
    ledger.clear();

    assert!(ledger.is_empty());
    assert_eq!(ledger.get("Alice"), None);
}

#[test]
fn serializes_as_a_json_object_in_insertion_order() {
    let mut ledger = Ledger::new();
    ledger.insert("Zoe", 1.0);
    ledger.insert("Alice", 5.0);

    let json = serde_json::to_string(&ledger).unwrap();
    assert_eq!(json, r#"{"Zoe":1.0,"Alice":5.0}"#);
}

#[test]
fn fractional_estimates_survive() {
    let mut ledger = Ledger::new();
    ledger.insert("Alice", 0.5);
    assert_eq!(ledger.get("Alice"), Some(0.5));
}
