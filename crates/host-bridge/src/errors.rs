use playscribe_capture::CaptureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("publish failed: {0}")]
    Publish(String),
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
