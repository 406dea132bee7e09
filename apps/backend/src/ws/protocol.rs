//! Wire protocol for the estimation websocket.
//!
//! Frames are JSON text tagged with `type`, camelCase, matching what the
//! host and player pages speak. Inbound frames that fail to parse are
//! dropped at the session boundary and never reach the ledger.

use serde::{Deserialize, Serialize};

use crate::domain::ledger::Ledger;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMsg {
    /// Facilitator claims the host seat under `topic`.
    Subscribe { topic: String },
    /// Facilitator gives the host seat up.
    Unsubscribe { topic: String },
    NewRound { task: String },
    CloseRound,
    RevealResult,
    ClearRound,
    AddEstimation { name: String, estimation: f64 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMsg {
    /// Broadcast when a round opens or is cleared (then with an empty task).
    NewRound { task: String },
    IsClosed { closed: bool },
    /// The reveal: full ledger, to everyone.
    Estimations { estimations: Ledger },
    /// Who has answered so far. Names only, never values.
    IntermediateEstimations { names: Vec<String> },
    /// Full ledger after a submission. Facilitator channel only.
    NewEstimation { estimations: Ledger },
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    HostSeatTaken,
}
