//! Event capture for recording sessions.
//!
//! A [`Recorder`] owns one [`RawTrace`](playscribe_core_types::RawTrace) and is
//! fed [`PageSignal`]s by whatever host can observe the page. Time comes from a
//! [`Clock`] so debounce behaviour can be driven deterministically.

pub mod clock;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod observers;
pub mod recorder;
pub mod signals;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CaptureConfig, ResultsHandler};
pub use debounce::{DebounceTimers, PendingCompletion};
pub use errors::{CaptureError, CaptureResult};
pub use observers::ObserverRegistry;
pub use recorder::{Recorder, RecorderState};
pub use signals::{DomElement, NodeKey, PageEnvironment, PageSignal};
