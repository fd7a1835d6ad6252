use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Timelike};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::services::time_context::{Ambient, ambient_for_hour};

pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Re-evaluates the ambient mode on a fixed interval and publishes it
/// through a shared slot. The owning task handle must be aborted on
/// teardown; the slot itself carries no background resources.
pub struct AmbientMonitor {
    shared: Arc<RwLock<Ambient>>,
    interval: Duration,
}

impl AmbientMonitor {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            shared: Arc::new(RwLock::new(ambient_for_hour(Local::now().hour()))),
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// The slot readers hold on to; stays valid after `start` consumes self.
    pub fn shared(&self) -> Arc<RwLock<Ambient>> {
        self.shared.clone()
    }

    /// Refresh loop. Runs until the owning task is aborted.
    pub async fn start(self) {
        info!("starting ambient monitor (interval: {:?})", self.interval);

        loop {
            tokio::time::sleep(self.interval).await;

            let ambient = ambient_for_hour(Local::now().hour());
            let mut current = self.shared.write().await;
            if *current != ambient {
                info!("ambient changed: {:?} -> {:?}", *current, ambient);
            } else {
                debug!("ambient unchanged: {:?}", ambient);
            }
            *current = ambient;
        }
    }
}
