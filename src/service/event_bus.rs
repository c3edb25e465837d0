//! Broadcast channel for live market events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. The notifier publishes
//! every visible price move and every crash as a [`MarketEvent`], and any relay
//! (socket feed, logger, test) subscribes to receive them. [`EventBus::spawn_feed_logger`]
//! is the relay the binary attaches at startup.

use tokio::{sync::broadcast, task::JoinHandle};

use crate::model::event::MarketEvent;

/// Broadcast bus for [`MarketEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<MarketEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: MarketEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribes a task that logs every market event.
    ///
    /// The subscription is taken before this returns, so events published
    /// afterwards are never missed. A lagging logger reports how many events it
    /// skipped and carries on. The task ends once every sender is dropped.
    ///
    /// # Returns
    /// Handle resolving to the number of events logged
    pub fn spawn_feed_logger(&self) -> JoinHandle<u64> {
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            let mut relayed: u64 = 0;
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        relayed += 1;
                        match &event {
                            MarketEvent::PriceUpdated(update) => tracing::debug!(
                                event_type = event.event_type_str(),
                                token_id = event.token_id(),
                                "{} {} -> {}",
                                update.symbol,
                                update.old_price,
                                update.new_price
                            ),
                            MarketEvent::TokenCrashed(crash) => tracing::info!(
                                event_type = event.event_type_str(),
                                token_id = event.token_id(),
                                "{} crashed from {}, {} alert(s) cancelled",
                                crash.symbol,
                                crash.last_price,
                                crash.cancelled_alerts
                            ),
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "market feed logger lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            relayed
        })
    }
}
