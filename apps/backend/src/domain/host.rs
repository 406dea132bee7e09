//! The facilitator seat: which connection may drive the round.
//!
//! The seat binds the facilitator role to a connection id instead of a bare
//! topic string, so a second facilitator cannot silently displace the first
//! and a dropped connection releases the seat instead of leaving stale
//! authorization behind.

use uuid::Uuid;

/// Claim was rejected because a different live connection holds the seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatTaken {
    pub topic: String,
}

/// The single facilitator seat: holder connection plus the topic id used for
/// targeted emissions and the polling facade's authorization check.
#[derive(Debug, Clone, Default)]
pub struct HostSeat {
    topic: String,
    holder: Option<Uuid>,
}

impl HostSeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic id of the current facilitator channel; empty when unseated.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn holder(&self) -> Option<Uuid> {
        self.holder
    }

    pub fn is_seated(&self) -> bool {
        self.holder.is_some()
    }

    /// Whether `host_id` matches the seated facilitator's topic. Always
    /// false while unseated, including for the empty string.
    pub fn authorizes(&self, host_id: &str) -> bool {
        self.holder.is_some() && self.topic == host_id
    }

    /// Take the seat for `conn` under `topic`. Rejected while a different
    /// connection holds it; the same connection may re-claim to change its
    /// topic id.
    pub fn claim(&mut self, conn: Uuid, topic: &str) -> Result<(), SeatTaken> {
        match self.holder {
            Some(holder) if holder != conn => Err(SeatTaken {
                topic: self.topic.clone(),
            }),
            _ => {
                self.holder = Some(conn);
                self.topic = topic.to_string();
                Ok(())
            }
        }
    }

    /// Release the seat if `conn` holds it. A non-holder release is a no-op,
    /// so a participant cannot evict the facilitator.
    /// Returns true when the seat was actually released.
    pub fn release(&mut self, conn: Uuid) -> bool {
        if self.holder == Some(conn) {
            self.holder = None;
            self.topic.clear();
            true
        } else {
            false
        }
    }
}
