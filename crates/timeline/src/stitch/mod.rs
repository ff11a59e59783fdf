//! The individual preprocessing steps. Each works on canonical selectors only.

pub(crate) mod clicks;
pub(crate) mod forms;
pub(crate) mod inputs;
pub(crate) mod merge;

use playscribe_core_types::TimestampMs;

/// `a` and `b` lie strictly less than `window_ms` apart. Never true for a
/// negative window.
pub(crate) fn within_window(a: TimestampMs, b: TimestampMs, window_ms: i64) -> bool {
    u64::try_from(window_ms).map_or(false, |window| a.abs_diff(b) < window)
}
