use burrow_core::ShortcodeStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Background task that periodically evicts expired records.
///
/// Without it, an expired code that is never looked up again stays in
/// memory forever.
pub struct Sweeper {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero or if called outside a tokio runtime.
    pub fn spawn(store: Arc<dyn ShortcodeStore>, interval: Duration) -> Self {
        let (shutdown, mut stop) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick fires immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = ticker.tick() => {
                        let removed = store.purge_expired();
                        if removed > 0 {
                            info!(removed, "swept expired records");
                        }
                    }
                }
            }
            debug!("sweeper stopped");
        });

        info!(?interval, "started expiry sweeper");
        Self { shutdown, handle }
    }

    /// Stops the loop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }
}
