use std::sync::Arc;

use playscribe_capture::{PageEnvironment, PageSignal, Recorder};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::bus::EventBus;
use crate::errors::BridgeError;
use crate::message::HostMessage;

/// Everything the host task consumes, in arrival order.
#[derive(Debug, Clone)]
pub enum HostInput {
    /// A raw `{type, data}` envelope from the host.
    Message(Value),
    /// A page signal for the recorder.
    Signal(PageSignal),
    /// Timer tick; fires due debounce completions and mouse samples.
    Tick,
}

/// Owns one recorder and connects it to a host: commands come in as
/// envelopes, results go out on the bus.
pub struct RecorderHost {
    recorder: Recorder,
    page: PageEnvironment,
    outbound: Arc<dyn EventBus<HostMessage>>,
}

impl RecorderHost {
    pub fn new(
        recorder: Recorder,
        page: PageEnvironment,
        outbound: Arc<dyn EventBus<HostMessage>>,
    ) -> Self {
        Self {
            recorder,
            page,
            outbound,
        }
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn into_recorder(self) -> Recorder {
        self.recorder
    }

    pub async fn announce_ready(&self) -> Result<(), BridgeError> {
        self.outbound.publish(HostMessage::ready()).await
    }

    /// Apply one host envelope. Lifecycle misuse is logged and ignored; only
    /// decode and publish failures surface as errors.
    pub async fn handle_message(&mut self, raw: &Value) -> Result<(), BridgeError> {
        let Some(message) = HostMessage::decode(raw)? else {
            return Ok(());
        };
        match message {
            HostMessage::Start => {
                if let Err(err) = self.recorder.start(&self.page) {
                    warn!(error = %err, "start ignored");
                }
            }
            HostMessage::Stop => match self.recorder.stop() {
                Ok(trace) => {
                    info!(session = %self.recorder.session_id(), "publishing results");
                    self.outbound.publish(HostMessage::Results(trace)).await?;
                }
                Err(err) => warn!(error = %err, "stop ignored"),
            },
            other => debug!(kind = other.kind(), "outbound-only message ignored"),
        }
        Ok(())
    }

    pub async fn handle(&mut self, input: HostInput) -> Result<(), BridgeError> {
        match input {
            HostInput::Message(raw) => self.handle_message(&raw).await,
            HostInput::Signal(signal) => {
                self.recorder.handle(signal);
                Ok(())
            }
            HostInput::Tick => {
                self.recorder.advance();
                Ok(())
            }
        }
    }

    /// Announce readiness, then serve inputs until the channel closes.
    /// Returns the recorder so callers can inspect its final state.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<HostInput>) -> Recorder {
        if let Err(err) = self.announce_ready().await {
            warn!(error = %err, "ready announcement not delivered");
        }
        while let Some(input) = inbound.recv().await {
            if let Err(err) = self.handle(input).await {
                warn!(error = %err, "host input failed");
            }
        }
        debug!("inbound channel closed");
        self.recorder
    }
}
