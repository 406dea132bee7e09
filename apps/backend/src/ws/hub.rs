//! Connection registry and fan-out primitive.
//!
//! Delivery is best effort to currently connected sessions: no queue, no
//! replay, no acks. Parties that connect after an emission resync through
//! the polling facade instead.

use actix::prelude::*;
use dashmap::{DashMap, DashSet};
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct WsRegistry {
    sessions: DashMap<Uuid, Recipient<Outbound>>,
    topics: DashMap<String, DashSet<Uuid>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Outbound>) {
        self.sessions.insert(conn_id, recipient);
    }

    /// Drop a connection and its topic memberships.
    pub fn unregister(&self, conn_id: Uuid) {
        self.sessions.remove(&conn_id);
        self.topics.retain(|_, members| {
            members.remove(&conn_id);
            !members.is_empty()
        });
    }

    pub fn join(&self, topic: &str, conn_id: Uuid) {
        self.topics
            .entry(topic.to_string())
            .or_default()
            .insert(conn_id);
    }

    pub fn leave(&self, topic: &str, conn_id: Uuid) {
        if let Some(members) = self.topics.get(topic) {
            members.remove(&conn_id);
        }
        self.topics.remove_if(topic, |_, members| members.is_empty());
    }

    /// Deliver to every currently connected session.
    pub fn publish_all(&self, msg: &ServerMsg) {
        for entry in self.sessions.iter() {
            entry.value().do_send(Outbound(msg.clone()));
        }
    }

    /// Deliver only to sessions joined to `topic`. Unknown topics (or the
    /// empty topic while nobody claimed it) deliver to nobody.
    pub fn publish_topic(&self, topic: &str, msg: &ServerMsg) {
        let Some(members) = self.topics.get(topic) else {
            return;
        };
        for conn_id in members.iter() {
            if let Some(recipient) = self.sessions.get(conn_id.key()) {
                recipient.value().do_send(Outbound(msg.clone()));
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.sessions.len()
    }
}
