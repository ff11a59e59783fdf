use playscribe_core_types::RawTrace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::errors::BridgeError;

pub const READY: &str = "recorder-ready";
pub const START: &str = "recorder-start";
pub const STOP: &str = "recorder-stop";
pub const RESULTS: &str = "recorder-results";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyStatus {
    pub status: String,
}

impl Default for ReadyStatus {
    fn default() -> Self {
        Self {
            status: "ready".to_string(),
        }
    }
}

/// The closed set of messages exchanged with a host, serialized as
/// `{"type": …, "data": …}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum HostMessage {
    #[serde(rename = "recorder-ready")]
    Ready(ReadyStatus),
    #[serde(rename = "recorder-start")]
    Start,
    #[serde(rename = "recorder-stop")]
    Stop,
    #[serde(rename = "recorder-results")]
    Results(RawTrace),
}

impl HostMessage {
    pub fn ready() -> Self {
        HostMessage::Ready(ReadyStatus::default())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HostMessage::Ready(_) => READY,
            HostMessage::Start => START,
            HostMessage::Stop => STOP,
            HostMessage::Results(_) => RESULTS,
        }
    }

    /// Decode an envelope. Messages without a `type`, or with a type outside
    /// the known set, decode to `None`.
    pub fn decode(raw: &Value) -> Result<Option<Self>, BridgeError> {
        let Some(kind) = raw.get("type").and_then(Value::as_str) else {
            trace!("message without type ignored");
            return Ok(None);
        };
        let data = raw.get("data").cloned().unwrap_or(Value::Null);
        let message = match kind {
            READY => {
                let status = if data.is_null() {
                    ReadyStatus::default()
                } else {
                    serde_json::from_value(data)
                        .map_err(|source| BridgeError::Malformed { kind: READY, source })?
                };
                HostMessage::Ready(status)
            }
            START => HostMessage::Start,
            STOP => HostMessage::Stop,
            RESULTS => HostMessage::Results(
                serde_json::from_value(data)
                    .map_err(|source| BridgeError::Malformed { kind: RESULTS, source })?,
            ),
            other => {
                trace!(kind = other, "unknown message type ignored");
                return Ok(None);
            }
        };
        Ok(Some(message))
    }

    pub fn to_value(&self) -> Result<Value, BridgeError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Read a trace from JSON text holding either a bare trace or a
/// `recorder-results` envelope.
pub fn trace_from_json(text: &str) -> Result<RawTrace, BridgeError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("type").is_some() {
        if let Some(HostMessage::Results(trace)) = HostMessage::decode(&value)? {
            return Ok(trace);
        }
    }
    serde_json::from_value(value).map_err(|source| BridgeError::Malformed {
        kind: "trace",
        source,
    })
}
