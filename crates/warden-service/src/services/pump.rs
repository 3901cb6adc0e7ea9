//! Event pump
//!
//! Drains a channel of inbound events, handling each on its own task. At
//! most `max_in_flight` events run at once; the router contains every
//! failure, so one event never affects the next.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info};

use warden_core::events::InboundEvent;

use super::router::EventRouter;

/// Event pump
pub struct EventPump {
    router: Arc<EventRouter>,
    permits: Arc<Semaphore>,
}

impl EventPump {
    pub fn new(router: EventRouter, max_in_flight: usize) -> Self {
        Self {
            router: Arc::new(router),
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Run until the sender side closes and every started event finishes
    ///
    /// Returns the number of events dispatched.
    pub async fn run(self, mut events: mpsc::Receiver<InboundEvent>) -> usize {
        let mut tasks = JoinSet::new();
        let mut dispatched = 0usize;

        while let Some(event) = events.recv().await {
            let Ok(permit) = self.permits.clone().acquire_owned().await else {
                break;
            };

            let router = self.router.clone();
            tasks.spawn(async move {
                router.dispatch(event).await;
                drop(permit);
            });
            dispatched += 1;

            while let Some(result) = tasks.try_join_next() {
                log_join(result);
            }
        }

        while let Some(result) = tasks.join_next().await {
            log_join(result);
        }

        info!(dispatched, "Event stream closed");
        dispatched
    }
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!(error = %e, "Event task panicked");
    }
}
