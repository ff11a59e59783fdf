use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("recorder is already recording")]
    AlreadyRecording,
    #[error("recording session already finished; reset the recorder first")]
    SessionFinished,
    #[error("recorder is not recording")]
    NotRecording,
}

pub type CaptureResult<T> = Result<T, CaptureError>;
