//! Preprocessing of raw traces into a replayable [`Timeline`].
//!
//! The pipeline is pure: identical traces and policies always yield identical
//! timelines. See [`api::preprocess`] for the ordered steps.

pub mod api;
pub mod errors;
pub mod export;
pub mod model;
pub mod policy;
mod stitch;

pub use api::{preprocess, preprocess_with_report};
pub use errors::{TlError, TlResult};
pub use model::{CanonicalEvent, EventCategory, EventPayload, StitchReport, Timeline};
pub use policy::{Channels, PreprocessPolicy};
