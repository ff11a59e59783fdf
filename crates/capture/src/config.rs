use std::fmt;
use std::sync::Arc;

use playscribe_core_types::RawTrace;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Callback invoked with the trace whenever results are processed.
pub type ProcessDataFn = dyn Fn(&RawTrace) + Send + Sync;

#[derive(Clone, Default)]
pub struct ResultsHandler(Option<Arc<ProcessDataFn>>);

impl ResultsHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&RawTrace) + Send + Sync + 'static,
    {
        Self(Some(Arc::new(handler)))
    }

    pub fn deliver(&self, trace: &RawTrace) {
        match &self.0 {
            Some(handler) => handler(trace),
            None => debug!(
                clicks = trace.clicks.click_details.len(),
                inputs = trace.input_changes.len(),
                "results processed without a handler"
            ),
        }
    }
}

impl fmt::Debug for ResultsHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResultsHandler")
            .field(&self.0.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// Toggles for each captured signal family. Omitted keys keep their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub user_info: bool,
    pub clicks: bool,
    pub mouse_movement: bool,
    pub mouse_movement_interval_secs: u64,
    pub mouse_scroll: bool,
    pub time_count: bool,
    pub clear_after_process: bool,
    pub window_resize: bool,
    pub visibility_change: bool,
    pub keyboard_activity: bool,
    pub page_navigation: bool,
    pub form_interactions: bool,
    pub touch_events: bool,
    pub audio_video_interaction: bool,
    pub custom_event_registration: bool,
    pub input_debounce_delay_ms: u64,
    #[serde(skip)]
    pub process_data: ResultsHandler,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            user_info: true,
            clicks: true,
            mouse_movement: false,
            mouse_movement_interval_secs: 1,
            mouse_scroll: true,
            time_count: true,
            clear_after_process: true,
            window_resize: true,
            visibility_change: true,
            keyboard_activity: true,
            page_navigation: true,
            form_interactions: true,
            touch_events: true,
            audio_video_interaction: true,
            custom_event_registration: true,
            input_debounce_delay_ms: 2000,
            process_data: ResultsHandler::default(),
        }
    }
}

impl CaptureConfig {
    pub fn with_process_data(mut self, handler: ResultsHandler) -> Self {
        self.process_data = handler;
        self
    }

    pub fn mouse_sample_interval_ms(&self) -> i64 {
        let ms = self.mouse_movement_interval_secs.max(1).saturating_mul(1000);
        i64::try_from(ms).unwrap_or(i64::MAX)
    }
}
