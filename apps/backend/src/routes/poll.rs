//! Read-only polling facade.
//!
//! The push channel gives no delivery guarantee, so both pages poll these
//! routes to (re)build their view: the host page for the full ledger, the
//! player page for the active task. Redundancy, not a security boundary.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::estimation;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct EstimationsQuery {
    #[serde(rename = "hostId", default)]
    host_id: String,
}

/// GET /getEstimations?hostId=<id>
///
/// 200 with the full ledger iff `hostId` matches the seated facilitator's
/// topic id, 403 otherwise (always 403 while no facilitator is seated).
async fn get_estimations(
    query: web::Query<EstimationsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ledger = estimation::polled_ledger(&app_state, &query.host_id)?;
    Ok(HttpResponse::Ok().json(ledger))
}

#[derive(Debug, Serialize)]
struct TaskResponse {
    question: String,
    #[serde(rename = "isClosed")]
    is_closed: bool,
}

/// GET /getTask
///
/// Unconditionally returns the active task and closed flag; lets a player
/// page restore round state on load or reconnect.
async fn get_task(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (question, is_closed) = estimation::polled_task(&app_state);
    Ok(HttpResponse::Ok().json(TaskResponse {
        question,
        is_closed,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/getEstimations", web::get().to(get_estimations));
    cfg.route("/getTask", web::get().to(get_task));
}
