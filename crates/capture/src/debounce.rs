//! Per-field deferred completion of text input.
//!
//! Each field has at most one pending completion. Nothing here reads a clock;
//! the recorder decides what "now" is and asks for whatever has come due.

use std::collections::BTreeMap;

use playscribe_core_types::TimestampMs;

/// A scheduled "complete" record for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCompletion {
    pub field: String,
    pub selector: String,
    pub value: String,
    pub due_at: TimestampMs,
}

#[derive(Debug, Clone)]
pub struct DebounceTimers {
    delay_ms: TimestampMs,
    pending: BTreeMap<String, PendingCompletion>,
}

impl DebounceTimers {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: TimestampMs::try_from(delay_ms).unwrap_or(TimestampMs::MAX),
            pending: BTreeMap::new(),
        }
    }

    pub fn delay_ms(&self) -> TimestampMs {
        self.delay_ms
    }

    /// Replace the field's timer with one due `delay_ms` after `now`.
    /// Returns the timer that was cancelled, if any.
    pub fn schedule(
        &mut self,
        field: &str,
        selector: &str,
        value: &str,
        now: TimestampMs,
    ) -> Option<PendingCompletion> {
        let completion = PendingCompletion {
            field: field.to_string(),
            selector: selector.to_string(),
            value: value.to_string(),
            due_at: now.saturating_add(self.delay_ms),
        };
        self.pending.insert(field.to_string(), completion)
    }

    /// Drop the field's timer without completing it. No-op when none is pending.
    pub fn cancel(&mut self, field: &str) -> Option<PendingCompletion> {
        self.pending.remove(field)
    }

    /// Resolve the field's timer immediately, handing it back to the caller
    /// to record. No-op when none is pending.
    pub fn force_flush(&mut self, field: &str) -> Option<PendingCompletion> {
        self.pending.remove(field)
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: TimestampMs) -> Vec<PendingCompletion> {
        let due_fields: Vec<String> = self
            .pending
            .values()
            .filter(|p| p.due_at <= now)
            .map(|p| p.field.clone())
            .collect();
        let mut due: Vec<PendingCompletion> = due_fields
            .iter()
            .filter_map(|field| self.pending.remove(field))
            .collect();
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.field.cmp(&b.field)));
        due
    }

    /// Remove and return every pending timer, earliest first.
    pub fn flush_all(&mut self) -> Vec<PendingCompletion> {
        let mut all: Vec<PendingCompletion> =
            std::mem::take(&mut self.pending).into_values().collect();
        all.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.field.cmp(&b.field)));
        all
    }

    pub fn next_due(&self) -> Option<TimestampMs> {
        self.pending.values().map(|p| p.due_at).min()
    }

    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
