// Outbound network task: turns queued requests into detached HTTP calls.

use crate::domain::{Inbound, Outbound, Transport};
use crate::use_cases::outbox::request_kind;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

/// Issues every queued request as its own task until the outbox closes.
///
/// Requests never wait on each other, so replies come back in completion
/// order. Failures are logged and dropped; the next cycle is the retry.
pub async fn outbound_task(
    mut outbound_rx: mpsc::Receiver<Outbound>,
    transport: Arc<dyn Transport>,
    reply_tx: mpsc::Sender<Inbound>,
) {
    while let Some(request) = outbound_rx.recv().await {
        let transport = transport.clone();
        let reply_tx = reply_tx.clone();
        tokio::spawn(async move {
            let kind = request_kind(&request);
            match transport.deliver(request).await {
                Ok(Some(reply)) => forward_reply(&reply_tx, reply, kind),
                Ok(None) => {}
                Err(e) => {
                    debug!(request = kind, error = %e, "request failed");
                }
            }
        });
    }
    info!("outbox closed; outbound task exiting");
}

fn forward_reply(reply_tx: &mpsc::Sender<Inbound>, reply: Inbound, kind: &'static str) {
    match reply_tx.try_send(reply) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            warn!(request = kind, "reply queue full; reply dropped");
        }
        Err(TrySendError::Closed(_)) => {
            debug!(request = kind, "bridge stopped; reply dropped");
        }
    }
}
