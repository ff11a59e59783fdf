use thiserror::Error;

#[derive(Debug, Error)]
pub enum TlError {
    #[error("line {line} is {bytes} bytes, over the {budget} byte budget")]
    Oversize {
        line: usize,
        bytes: usize,
        budget: usize,
    },
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TlResult<T> = Result<T, TlError>;
