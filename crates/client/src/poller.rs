//! Order Poller
//!
//! Follows an order until it is delivered by re-fetching it on a fixed
//! interval. There is no backoff and no retry limit: failed fetches are logged
//! and the next tick tries again. Drop the future to stop watching.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{error::ClientError, models::Order};

/// Somewhere to read an order's current state from.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch the current state of `order`.
    async fn fetch_order(&self, order: Uuid) -> Result<Order, ClientError>;
}

/// Re-fetches an order on a fixed interval until it is delivered.
#[derive(Debug, Clone)]
pub struct OrderPoller<O> {
    source: O,
    interval: Duration,
}

impl<O: OrderSource> OrderPoller<O> {
    /// Poll `source` once every `interval`.
    pub fn new(source: O, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Poll `order` until it reaches a terminal status and return it.
    ///
    /// `on_change` sees the first fetched snapshot and then every snapshot
    /// whose status differs from the last one seen.
    pub async fn watch<F>(&self, order: Uuid, mut on_change: F) -> Order
    where
        F: FnMut(&Order) + Send,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_status = None;

        loop {
            ticker.tick().await;

            let current = match self.source.fetch_order(order).await {
                Ok(current) => current,
                Err(error) => {
                    warn!(%order, %error, "failed to refresh order");
                    continue;
                }
            };

            if last_status != Some(current.status) {
                debug!(%order, status = current.status.as_str(), "order status changed");

                last_status = Some(current.status);
                on_change(&current);
            }

            if current.status.is_terminal() {
                return current;
            }
        }
    }
}
