use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::estimation;
use crate::state::app_state::AppState;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, app_state);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    app_state: web::Data<AppState>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id,
            app_state,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    /// Inbound command dispatch. Round commands never fail; a rejected seat
    /// claim answers this session only and leaves the socket open.
    fn handle_client_msg(&self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let state = self.app_state.get_ref();
        match msg {
            ClientMsg::Subscribe { topic } => {
                if let Err(err) = estimation::claim_host(state, self.conn_id, &topic) {
                    warn!(
                        conn_id = %self.conn_id,
                        topic,
                        "[WS SESSION] host seat claim rejected"
                    );
                    Self::send_json(
                        ctx,
                        &ServerMsg::Error {
                            code: ErrorCode::HostSeatTaken,
                            message: err.to_string(),
                        },
                    );
                }
            }
            ClientMsg::Unsubscribe { topic } => {
                estimation::release_host(state, self.conn_id, &topic);
            }
            ClientMsg::NewRound { task } => estimation::start_round(state, &task),
            ClientMsg::CloseRound => estimation::close_round(state),
            ClientMsg::RevealResult => estimation::reveal_result(state),
            ClientMsg::ClearRound => estimation::clear_round(state),
            ClientMsg::AddEstimation { name, estimation } => {
                estimation::add_estimation(state, &name, estimation);
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");

        let recipient = ctx.address().recipient::<Outbound>();
        self.app_state.registry().register(self.conn_id, recipient);

        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.app_state.registry().unregister(self.conn_id);
        // A facilitator that drops without unsubscribing gives the seat up here
        estimation::connection_closed(self.app_state.get_ref(), self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                // Fail closed: a frame that does not validate is dropped
                // before it can reach the ledger.
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => {
                        warn!(
                            conn_id = %self.conn_id,
                            error = %err,
                            "[WS SESSION] dropped malformed frame"
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                warn!(conn_id = %self.conn_id, "[WS SESSION] dropped binary frame");
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: ErrorCode::BadRequest,
                        message: "Binary not supported".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
