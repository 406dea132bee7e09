//! Estimation session commands and reads.
//!
//! Each command locks the session, runs the pure domain operation to
//! completion, captures the emitted events and the facilitator topic, then
//! releases the lock before fanning out. Lock-acquisition order is the only
//! arbiter of concurrent submissions.

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ledger::Ledger;
use crate::domain::round::RoundEvent;
use crate::error::AppError;
use crate::state::app_state::{AppState, SessionState};
use crate::ws::protocol::ServerMsg;

/// Delivery scope for one outbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    All,
    Topic(String),
}

/// Map domain events onto wire messages and delivery scopes, in order.
/// `host_topic` is the facilitator channel current at the time the events
/// were produced; only `LedgerUpdated` is scoped to it.
fn route_events(events: Vec<RoundEvent>, host_topic: &str) -> Vec<(Scope, ServerMsg)> {
    events
        .into_iter()
        .map(|event| match event {
            RoundEvent::RoundCleared => (
                Scope::All,
                ServerMsg::NewRound {
                    task: String::new(),
                },
            ),
            RoundEvent::ClosedChanged { closed } => (Scope::All, ServerMsg::IsClosed { closed }),
            RoundEvent::RoundOpened { task } => (Scope::All, ServerMsg::NewRound { task }),
            RoundEvent::LedgerUpdated { ledger } => (
                Scope::Topic(host_topic.to_string()),
                ServerMsg::NewEstimation {
                    estimations: ledger,
                },
            ),
            RoundEvent::ProgressChanged { names } => {
                (Scope::All, ServerMsg::IntermediateEstimations { names })
            }
            RoundEvent::LedgerRevealed { ledger } => (
                Scope::All,
                ServerMsg::Estimations {
                    estimations: ledger,
                },
            ),
        })
        .collect()
}

fn dispatch(state: &AppState, scoped: Vec<(Scope, ServerMsg)>) {
    let registry = state.registry();
    for (scope, msg) in scoped {
        match scope {
            Scope::All => registry.publish_all(&msg),
            Scope::Topic(topic) => registry.publish_topic(&topic, &msg),
        }
    }
}

fn run_round_op(state: &AppState, op: impl FnOnce(&mut SessionState) -> Vec<RoundEvent>) {
    let (events, host_topic) = {
        let mut session = state.session();
        let events = op(&mut session);
        (events, session.host.topic().to_string())
    };
    dispatch(state, route_events(events, &host_topic));
}

/// Open a new round. Wipes the previous ledger first.
pub fn start_round(state: &AppState, task: &str) {
    info!(task, "round opened");
    run_round_op(state, |session| session.round.start(task));
}

/// Stop accepting estimates.
pub fn close_round(state: &AppState) {
    info!("round closed");
    run_round_op(state, |session| session.round.close());
}

/// Broadcast the full ledger to everyone.
pub fn reveal_result(state: &AppState) {
    info!("result revealed");
    run_round_op(state, |session| session.round.reveal());
}

/// Reset task, flag, and ledger.
pub fn clear_round(state: &AppState) {
    info!("round cleared");
    run_round_op(state, |session| session.round.clear());
}

/// Record a participant's estimate. Silently discarded while the round is
/// closed; the submitter is not told.
pub fn add_estimation(state: &AppState, name: &str, value: f64) {
    debug!(name, "estimation received");
    run_round_op(state, |session| session.round.submit(name, value));
}

/// Seat `conn` as the facilitator under `topic` and join it to the topic
/// channel. Rejected while another connection holds the seat.
pub fn claim_host(state: &AppState, conn: Uuid, topic: &str) -> Result<(), AppError> {
    let previous_topic = {
        let mut session = state.session();
        let previous = session.host.topic().to_string();
        session.host.claim(conn, topic).map_err(|taken| {
            AppError::conflict(
                "HOST_SEAT_TAKEN",
                format!("facilitator seat is already held under topic {:?}", taken.topic),
            )
        })?;
        previous
    };

    // Re-claiming under a new topic moves the channel membership with it
    if !previous_topic.is_empty() && previous_topic != topic {
        state.registry().leave(&previous_topic, conn);
    }
    state.registry().join(topic, conn);
    info!(%conn, topic, "facilitator seated");
    Ok(())
}

/// Give the seat up. Only the holder can release it; anyone may leave the
/// topic channel they joined.
pub fn release_host(state: &AppState, conn: Uuid, topic: &str) {
    state.registry().leave(topic, conn);
    let released = state.session().host.release(conn);
    if released {
        info!(%conn, "facilitator seat released");
    }
}

/// Connection teardown: release the seat if this connection held it, so a
/// crashed facilitator does not leave stale authorization behind.
pub fn connection_closed(state: &AppState, conn: Uuid) {
    let released = state.session().host.release(conn);
    if released {
        info!(%conn, "facilitator disconnected, seat released");
    }
}

/// Polling facade: the full ledger, gated by the facilitator topic id.
pub fn polled_ledger(state: &AppState, host_id: &str) -> Result<Ledger, AppError> {
    let session = state.session();
    if !session.host.authorizes(host_id) {
        return Err(AppError::forbidden(
            "hostId does not match the current facilitator".to_string(),
        ));
    }
    Ok(session.round.ledger().clone())
}

/// Polling facade: current task text and closed flag, no authorization.
pub fn polled_task(state: &AppState) -> (String, bool) {
    let session = state.session();
    (session.round.task().to_string(), session.round.is_closed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_events(state: &AppState, name: &str, value: f64) -> Vec<RoundEvent> {
        let mut session = state.session();
        session.round.submit(name, value)
    }

    #[test]
    fn submit_routes_ledger_to_host_and_names_to_all() {
        let state = AppState::new();
        let conn = Uuid::new_v4();
        claim_host(&state, conn, "host-42").unwrap();
        state.session().round.start("Story-12");

        let events = submit_events(&state, "Alice", 5.0);
        let host_topic = state.session().host.topic().to_string();
        let scoped = route_events(events, &host_topic);

        assert_eq!(scoped.len(), 2);
        match &scoped[0] {
            (Scope::Topic(topic), ServerMsg::NewEstimation { estimations }) => {
                assert_eq!(topic, "host-42");
                assert_eq!(estimations.get("Alice"), Some(5.0));
            }
            other => panic!("expected host-scoped NewEstimation, got {other:?}"),
        }
        match &scoped[1] {
            (Scope::All, ServerMsg::IntermediateEstimations { names }) => {
                assert_eq!(names, &vec!["Alice".to_string()]);
            }
            other => panic!("expected broadcast IntermediateEstimations, got {other:?}"),
        }
    }

    #[test]
    fn start_routes_three_broadcasts_in_order() {
        let state = AppState::new();
        let events = { state.session().round.start("Story-12") };
        let scoped = route_events(events, "");

        let kinds: Vec<&Scope> = scoped.iter().map(|(s, _)| s).collect();
        assert!(kinds.iter().all(|s| **s == Scope::All));

        assert!(
            matches!(&scoped[0].1, ServerMsg::NewRound { task } if task.is_empty()),
            "clear notification first"
        );
        assert!(matches!(
            &scoped[1].1,
            ServerMsg::IsClosed { closed: false }
        ));
        assert!(matches!(&scoped[2].1, ServerMsg::NewRound { task } if task == "Story-12"));
    }

    #[test]
    fn second_facilitator_claim_is_a_conflict() {
        let state = AppState::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        claim_host(&state, first, "host-1").unwrap();
        let err = claim_host(&state, second, "host-2").unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        // the first facilitator still authorizes polling
        assert!(polled_ledger(&state, "host-1").is_ok());
        assert!(polled_ledger(&state, "host-2").is_err());
    }

    #[test]
    fn polled_ledger_requires_the_exact_host_id() {
        let state = AppState::new();
        let conn = Uuid::new_v4();

        // unseated: everything is rejected, the empty string included
        assert!(polled_ledger(&state, "").is_err());
        assert!(polled_ledger(&state, "host-42").is_err());

        claim_host(&state, conn, "host-42").unwrap();
        start_round(&state, "Story-12");
        add_estimation(&state, "Alice", 5.0);

        let ledger = polled_ledger(&state, "host-42").unwrap();
        assert_eq!(ledger.get("Alice"), Some(5.0));
        assert!(polled_ledger(&state, "wrong").is_err());
    }

    #[test]
    fn disconnect_releases_the_seat_for_polling() {
        let state = AppState::new();
        let conn = Uuid::new_v4();

        claim_host(&state, conn, "host-42").unwrap();
        assert!(polled_ledger(&state, "host-42").is_ok());

        connection_closed(&state, conn);
        assert!(polled_ledger(&state, "host-42").is_err());
    }

    #[test]
    fn polled_task_mirrors_round_state() {
        let state = AppState::new();
        assert_eq!(polled_task(&state), (String::new(), false));

        start_round(&state, "Story-12");
        assert_eq!(polled_task(&state), ("Story-12".to_string(), false));

        close_round(&state);
        assert_eq!(polled_task(&state), ("Story-12".to_string(), true));

        clear_round(&state);
        assert_eq!(polled_task(&state), (String::new(), false));
    }

    #[test]
    fn closed_round_discards_submissions_silently() {
        let state = AppState::new();
        let conn = Uuid::new_v4();
        claim_host(&state, conn, "host-42").unwrap();

        start_round(&state, "Story-12");
        add_estimation(&state, "Alice", 5.0);
        close_round(&state);
        add_estimation(&state, "Bob", 3.0);

        let ledger = polled_ledger(&state, "host-42").unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("Bob"), None);
    }
}
