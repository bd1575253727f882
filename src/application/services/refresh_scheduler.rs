use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::application::services::time_source::{RefreshCadence, TimeSource};
use crate::domain::entities::time_snapshot::TimeSnapshot;

const CHANNEL_CAPACITY: usize = 16;

/// One ticker per cadence, shared by every consumer asking for that cadence
pub struct RefreshScheduler {
    time_source: TimeSource,
    tickers: Mutex<HashMap<RefreshCadence, broadcast::Sender<TimeSnapshot>>>,
}

/// Receiving end of a cadence; dropping it cancels the subscription
pub struct RefreshSubscription {
    cadence: RefreshCadence,
    receiver: broadcast::Receiver<TimeSnapshot>,
}

impl RefreshSubscription {
    pub fn cadence(&self) -> RefreshCadence {
        self.cadence
    }

    /// Wait for the next tick; `None` once the ticker is gone.
    /// Lagging consumers skip straight to the newest snapshot.
    pub async fn next(&mut self) -> Option<TimeSnapshot> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("{:?} consumer lagged by {} ticks", self.cadence, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn cancel(self) {}
}

impl RefreshScheduler {
    pub fn new(time_source: TimeSource) -> Self {
        Self {
            time_source,
            tickers: Mutex::new(HashMap::new()),
        }
    }

    /// Must be called inside a tokio runtime; starts the cadence's ticker if idle
    pub fn subscribe(&self, cadence: RefreshCadence) -> RefreshSubscription {
        let mut tickers = match self.tickers.lock() {
            Ok(tickers) => tickers,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(sender) = tickers.get(&cadence) {
            if sender.receiver_count() > 0 {
                return RefreshSubscription {
                    cadence,
                    receiver: sender.subscribe(),
                };
            }
        }

        let (sender, receiver) = broadcast::channel(CHANNEL_CAPACITY);
        tickers.insert(cadence, sender.clone());
        Self::spawn_ticker(cadence, sender, self.time_source.clone());

        RefreshSubscription { cadence, receiver }
    }

    /// Number of consumers currently attached to `cadence`
    pub fn subscriber_count(&self, cadence: RefreshCadence) -> usize {
        self.tickers
            .lock()
            .ok()
            .and_then(|tickers| tickers.get(&cadence).map(|sender| sender.receiver_count()))
            .unwrap_or(0)
    }

    fn spawn_ticker(
        cadence: RefreshCadence,
        sender: broadcast::Sender<TimeSnapshot>,
        time_source: TimeSource,
    ) {
        debug!("Starting {:?} ticker", cadence);
        tokio::spawn(async move {
            let period = cadence.period();
            // first tick one period after start, aligned to start rather than to second boundaries
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;

                if sender.send(time_source.snapshot()).is_err() {
                    debug!("{:?} ticker has no consumers, stopping", cadence);
                    break;
                }
            }
        });
    }
}

impl std::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshScheduler").finish_non_exhaustive()
    }
}
