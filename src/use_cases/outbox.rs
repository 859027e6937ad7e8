// Non-blocking hand-off of outbound requests to the network task.

use crate::domain::Outbound;
use tokio::sync::mpsc;
use tracing::warn;

/// Sending half used by bridge components; never waits.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::Sender<Outbound>,
}

impl Outbox {
    /// Creates an outbox and the receiver the network task drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queues `request`; returns false when it was dropped.
    ///
    /// A full or closed queue drops the request. The next scheduled cycle
    /// is the only retry.
    pub fn push(&self, request: Outbound) -> bool {
        match self.tx.try_send(request) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(request)) => {
                warn!(request = request_kind(&request), "outbox full; request dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(request)) => {
                warn!(request = request_kind(&request), "outbox closed; request dropped");
                false
            }
        }
    }
}

pub fn request_kind(request: &Outbound) -> &'static str {
    match request {
        Outbound::Report(_) => "report",
        Outbound::LegacyPull { .. } => "legacy_pull",
        Outbound::State(_) => "state",
        Outbound::NextMove { .. } => "next_move",
        Outbound::PollCommands => "commands",
        Outbound::Hit(_) => "hit",
        Outbound::Unmute { .. } => "unmute",
    }
}
