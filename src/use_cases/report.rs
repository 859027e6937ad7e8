// Report cycle: roster plus buffered chat pushed to the decision service.

use super::chat::ChatBuffer;
use super::outbox::Outbox;
use crate::domain::{ActorInfo, Outbound, PlayerSummary, ReportPayload};
use tracing::debug;

pub struct ReportClient {
    outbox: Outbox,
}

impl ReportClient {
    pub fn new(outbox: Outbox) -> Self {
        Self { outbox }
    }

    /// Pushes one report if any chat is buffered; returns whether a request was issued.
    ///
    /// The buffer is cleared before the request is queued, so chat arriving
    /// while it is in flight goes out with the next report.
    pub fn flush(&self, chat: &mut ChatBuffer, players: &[ActorInfo]) -> bool {
        // Nothing to say; skip the round trip.
        if chat.is_empty() {
            return false;
        }

        let chats = chat.drain();
        let payload = ReportPayload {
            players: players.iter().map(PlayerSummary::from).collect(),
            chats,
        };
        debug!(
            players = payload.players.len(),
            chats = payload.chats.len(),
            "flushing report"
        );
        self.outbox.push(Outbound::Report(payload))
    }
}
