use burrow_core::{EventSink, LogEvent};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;
use ureq::Agent;

#[derive(Debug, Clone, TypedBuilder)]
pub struct RemoteSinkConfig {
    /// Collector endpoint that accepts one JSON event per POST.
    #[builder(setter(into))]
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    #[builder(default)]
    pub token: Option<String>,
    /// Events queued beyond this are dropped. Must be positive.
    #[builder(default = 1024)]
    pub queue_capacity: usize,
    #[builder(default = Duration::from_secs(2))]
    pub timeout: Duration,
}

/// Ships events to a remote log collector.
///
/// `emit` only enqueues; a worker task drains the queue and POSTs each
/// event. A full queue, a dead worker or a failed request all drop the
/// event. Nothing is retried.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    tx: mpsc::Sender<LogEvent>,
}

impl RemoteSink {
    /// Starts the delivery worker on the current tokio runtime.
    ///
    /// The worker exits once every `RemoteSink` clone has been dropped and
    /// the queue is drained.
    pub fn spawn(config: RemoteSinkConfig) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<LogEvent>(config.queue_capacity);
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let agent = agent.clone();
                let endpoint = config.endpoint.clone();
                let token = config.token.clone();

                let delivered = tokio::task::spawn_blocking(move || {
                    send_event(&agent, &endpoint, token.as_deref(), &event)
                })
                .await;

                match delivered {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(endpoint = %config.endpoint, error = %e, "failed to send log event"),
                    Err(e) => warn!(error = %e, "log delivery task failed"),
                }
            }
            debug!("remote log sink worker stopped");
        });

        (Self { tx }, handle)
    }
}

fn send_event(
    agent: &Agent,
    endpoint: &str,
    token: Option<&str>,
    event: &LogEvent,
) -> Result<(), ureq::Error> {
    let mut request = agent.post(endpoint);
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }
    request.send_json(event)?;
    Ok(())
}

impl EventSink for RemoteSink {
    fn emit(&self, event: LogEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("log queue full, dropping event"),
            Err(TrySendError::Closed(_)) => debug!("log worker gone, dropping event"),
        }
    }
}
