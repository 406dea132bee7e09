//! Round lifecycle state machine and the emissions it produces.

use crate::domain::ledger::Ledger;

/// Lifecycle phases of the single active round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// No task set.
    Empty,
    /// Task set, accepting estimates.
    Open,
    /// Task set, submissions rejected.
    Closed,
}

/// Events produced by round operations, in emission order.
///
/// Delivery scope is decided by the service layer: `LedgerUpdated` goes to
/// the facilitator channel only, everything else is broadcast to all
/// connected parties.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// The round was reset; the wire form is a new-round frame with the
    /// empty task.
    RoundCleared,
    /// The open/closed flag changed (or was re-asserted).
    ClosedChanged { closed: bool },
    /// A new round was opened with this task.
    RoundOpened { task: String },
    /// Full ledger after a submission. Facilitator-only.
    LedgerUpdated { ledger: Ledger },
    /// Names of everyone who has answered so far, without values.
    ProgressChanged { names: Vec<String> },
    /// Full ledger, revealed to everyone.
    LedgerRevealed { ledger: Ledger },
}

/// The single active round: task text, open/closed flag, and the ledger of
/// submitted estimates. All mutation goes through the operations below.
#[derive(Debug, Clone, Default)]
pub struct Round {
    task: String,
    closed: bool,
    ledger: Ledger,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current phase. `closed` and `task` are independent flags, so a round
    /// can be flagged closed while no task is set; that combination still
    /// reads as `Empty` (and `submit` is rejected by the flag, not the phase).
    pub fn phase(&self) -> Phase {
        if self.task.is_empty() {
            Phase::Empty
        } else if self.closed {
            Phase::Closed
        } else {
            Phase::Open
        }
    }

    /// Open a new round. Always clears first, so any previous ledger is gone
    /// before the new task is visible. The empty task is legal input and is
    /// indistinguishable from the cleared state.
    pub fn start(&mut self, task: &str) -> Vec<RoundEvent> {
        let mut events = self.clear();
        self.task = task.to_string();
        self.closed = false;
        events.push(RoundEvent::ClosedChanged { closed: false });
        events.push(RoundEvent::RoundOpened {
            task: self.task.clone(),
        });
        events
    }

    /// Stop accepting submissions. Legal in any state, including with no
    /// task set; re-closing an already closed round re-emits the flag.
    pub fn close(&mut self) -> Vec<RoundEvent> {
        self.closed = true;
        vec![RoundEvent::ClosedChanged { closed: true }]
    }

    /// Emit the full ledger to everyone. No state change; an empty ledger is
    /// revealed as-is.
    pub fn reveal(&self) -> Vec<RoundEvent> {
        vec![RoundEvent::LedgerRevealed {
            ledger: self.ledger.clone(),
        }]
    }

    /// Reset to the empty state: no task, open flag, empty ledger.
    pub fn clear(&mut self) -> Vec<RoundEvent> {
        self.task.clear();
        self.closed = false;
        self.ledger.clear();
        vec![RoundEvent::RoundCleared]
    }

    /// Record an estimate. While the round is closed this is a silent no-op:
    /// the ledger is untouched and nothing is emitted.
    pub fn submit(&mut self, name: &str, value: f64) -> Vec<RoundEvent> {
        if self.closed {
            return Vec::new();
        }
        self.ledger.insert(name, value);
        vec![
            RoundEvent::LedgerUpdated {
                ledger: self.ledger.clone(),
            },
            RoundEvent::ProgressChanged {
                names: self.ledger.names(),
            },
        ]
    }
}
