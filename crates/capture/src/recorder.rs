use std::sync::Arc;

use playscribe_core_types::{
    Assertion, AssertionKind, ClickDetail, ControlKind, CustomEventRecord, FocusChange, FocusKind,
    FormElementChange, FormSubmission, InputChange, InputPhase, KeyboardActivity,
    MediaInteraction, MouseSample, NavigationEntry, RawTrace, ScrollPosition, SessionId,
    TimestampMs, TouchRecord, VisibilityChange, WindowSize,
};
use playscribe_selector::{click_selector, field_selector, DomNode, ElementInfo};
use tracing::{debug, info, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::CaptureConfig;
use crate::debounce::{DebounceTimers, PendingCompletion};
use crate::errors::{CaptureError, CaptureResult};
use crate::observers::ObserverRegistry;
use crate::signals::{PageEnvironment, PageSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Stopped,
}

#[derive(Debug, Clone, Default)]
struct MouseTracker {
    latest: Option<MouseSample>,
    next_sample_at: Option<TimestampMs>,
}

/// Owns one recording session: `Idle -> Recording -> Stopped`.
///
/// Signals arriving outside `Recording` are dropped. A stopped recorder must be
/// [`reset`](Recorder::reset) before it can record again.
pub struct Recorder {
    config: CaptureConfig,
    clock: Arc<dyn Clock>,
    state: RecorderState,
    session: SessionId,
    trace: RawTrace,
    timers: DebounceTimers,
    observers: ObserverRegistry,
    mouse: MouseTracker,
    last_timestamp: TimestampMs,
}

impl Recorder {
    pub fn new(config: CaptureConfig, clock: Arc<dyn Clock>) -> Self {
        let timers = DebounceTimers::new(config.input_debounce_delay_ms);
        Self {
            config,
            clock,
            state: RecorderState::Idle,
            session: SessionId::new(),
            trace: RawTrace::new(),
            timers,
            observers: ObserverRegistry::new(),
            mouse: MouseTracker::default(),
            last_timestamp: TimestampMs::MIN,
        }
    }

    pub fn with_system_clock(config: CaptureConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn pending_inputs(&self) -> usize {
        self.timers.len()
    }

    pub fn start(&mut self, env: &PageEnvironment) -> CaptureResult<()> {
        match self.state {
            RecorderState::Recording => return Err(CaptureError::AlreadyRecording),
            RecorderState::Stopped => return Err(CaptureError::SessionFinished),
            RecorderState::Idle => {}
        }

        self.trace = RawTrace::new();
        self.timers = DebounceTimers::new(self.config.input_debounce_delay_ms);
        self.mouse = MouseTracker::default();
        let now = self.now();
        if self.config.time_count {
            self.trace.time.start_time = now;
        }
        if self.config.user_info {
            self.trace.user_info = Some(env.user_info.clone());
        }
        let wired = self.observers.attach(&env.document, &self.config);
        if self.config.mouse_movement {
            self.mouse.next_sample_at = Some(now.saturating_add(self.config.mouse_sample_interval_ms()));
        }
        self.state = RecorderState::Recording;
        info!(
            session = %self.session,
            forms = wired.forms,
            media = wired.media,
            "recording started"
        );
        Ok(())
    }

    /// Finish the session and hand back the frozen trace.
    ///
    /// Pending input timers are flushed first so no settled value is lost.
    pub fn stop(&mut self) -> CaptureResult<RawTrace> {
        if self.state != RecorderState::Recording {
            return Err(CaptureError::NotRecording);
        }
        let now = self.now();
        self.fire_due(now);
        self.flush_pending(now);
        if self.config.time_count {
            self.trace.time.stop_time = now;
        }
        self.observers.detach();
        self.state = RecorderState::Stopped;
        let snapshot = self.deliver(now);
        info!(
            session = %self.session,
            clicks = snapshot.clicks.click_details.len(),
            inputs = snapshot.input_changes.len(),
            "recording stopped"
        );
        Ok(snapshot)
    }

    /// Back to `Idle` with an empty trace and a fresh session id.
    pub fn reset(&mut self) {
        self.observers.detach();
        self.timers.clear();
        self.trace = RawTrace::new();
        self.mouse = MouseTracker::default();
        self.session = SessionId::new();
        self.state = RecorderState::Idle;
    }

    /// Snapshot of the live buffer.
    pub fn current_trace(&self) -> RawTrace {
        let mut snapshot = self.trace.clone();
        if self.config.time_count && self.state == RecorderState::Recording {
            snapshot.time.current_time = self.clock.now_ms().max(self.last_timestamp);
        }
        snapshot
    }

    /// Flush pending input, deliver the trace to the results handler and,
    /// when configured, clear the live buffer. Returns what was delivered.
    pub fn process_results(&mut self) -> RawTrace {
        let now = self.now();
        self.fire_due(now);
        self.flush_pending(now);
        self.deliver(now)
    }

    /// Fire debounce timers and mouse sampling that are due at the clock's
    /// current time. Hosts call this from their timer tick.
    pub fn advance(&mut self) {
        if self.state != RecorderState::Recording {
            return;
        }
        let now = self.now();
        self.fire_due(now);
        self.sample_mouse(now);
    }

    pub fn register_custom_event(&mut self, name: &str) -> bool {
        if !self.config.custom_event_registration {
            debug!(name, "custom event registration disabled");
            return false;
        }
        self.observers.register_custom_event(name)
    }

    /// Record an explicit assertion made by the user during the session.
    pub fn add_assertion(
        &mut self,
        selector: &str,
        kind: AssertionKind,
        value: Option<String>,
    ) -> bool {
        if self.state != RecorderState::Recording {
            debug!(selector, "assertion outside recording dropped");
            return false;
        }
        let now = self.now();
        self.fire_due(now);
        self.trace.assertions.push(Assertion {
            selector: selector.to_string(),
            kind,
            value,
            timestamp: now,
        });
        true
    }

    pub fn handle(&mut self, signal: PageSignal) {
        if self.state != RecorderState::Recording {
            trace!(signal = signal.name(), "signal outside recording dropped");
            return;
        }
        let now = self.now();
        self.fire_due(now);
        self.sample_mouse(now);

        match signal {
            PageSignal::Click { x, y, path } => {
                if self.config.clicks {
                    self.on_click(x, y, &path, now);
                }
            }
            PageSignal::Input { path, value } => {
                if self.config.keyboard_activity {
                    self.on_input(&path, value, now);
                }
            }
            PageSignal::Focus { path } => {
                if self.config.keyboard_activity {
                    self.on_focus_change(&path, FocusKind::Focus, None, now);
                }
            }
            PageSignal::Blur { path, value } => {
                if self.config.keyboard_activity {
                    self.on_focus_change(&path, FocusKind::Blur, Some(value), now);
                }
            }
            PageSignal::FormControl {
                path,
                value,
                checked,
                option_text,
            } => {
                if self.config.form_interactions {
                    self.on_form_control(&path, value, checked, option_text, now);
                }
            }
            PageSignal::KeyDown { key, target } => {
                let in_field = target
                    .as_ref()
                    .map(ElementInfo::is_input_or_textarea)
                    .unwrap_or(false);
                if self.config.keyboard_activity && !in_field {
                    self.trace.keyboard_activities.push(KeyboardActivity {
                        key,
                        timestamp: now,
                    });
                }
            }
            PageSignal::Navigation { url } => {
                if self.config.page_navigation {
                    self.trace
                        .navigation_history
                        .push(NavigationEntry { url, timestamp: now });
                }
            }
            PageSignal::FormSubmit { form, name } => {
                if self.config.form_interactions && self.observers.is_form_wired(form) {
                    self.trace.form_interactions.push(FormSubmission {
                        name,
                        timestamp: now,
                    });
                } else {
                    debug!(form = form.0, "submit from unwired form ignored");
                }
            }
            PageSignal::MediaPlay { element, source } => {
                if self.config.audio_video_interaction && self.observers.is_media_wired(element) {
                    self.trace.media_interactions.push(MediaInteraction {
                        kind: "play".to_string(),
                        source,
                        timestamp: now,
                    });
                } else {
                    debug!(element = element.0, "play from unwired media ignored");
                }
            }
            PageSignal::NodesInserted { nodes } => {
                self.observers.observe_inserted(&nodes, &self.config);
            }
            PageSignal::TouchStart { x, y } => {
                if self.config.touch_events {
                    self.trace.touch_events.push(TouchRecord {
                        kind: "touchstart".to_string(),
                        x,
                        y,
                        timestamp: now,
                    });
                }
            }
            PageSignal::Resize { width, height } => {
                if self.config.window_resize {
                    self.trace.window_sizes.push(WindowSize {
                        width,
                        height,
                        timestamp: now,
                    });
                }
            }
            PageSignal::VisibilityChange { state } => {
                if self.config.visibility_change {
                    self.trace
                        .visibility_changes
                        .push(VisibilityChange { state, timestamp: now });
                    self.checkpoint(now);
                }
            }
            PageSignal::Scroll { x, y } => {
                if self.config.mouse_scroll {
                    self.trace
                        .mouse_scroll
                        .push(ScrollPosition { x, y, timestamp: now });
                }
            }
            PageSignal::MouseMove { x, y } => {
                if self.config.mouse_movement {
                    self.mouse.latest = Some(MouseSample { x, y, timestamp: now });
                }
            }
            PageSignal::Custom { name, detail } => {
                if self.config.custom_event_registration
                    && self.observers.is_custom_event_registered(&name)
                {
                    self.trace.custom_events.push(CustomEventRecord {
                        name,
                        detail,
                        timestamp: now,
                    });
                }
            }
        }
    }

    fn on_click(&mut self, x: f64, y: f64, path: &[DomNode], now: TimestampMs) {
        let selector = click_selector(path);
        self.trace.clicks.click_count += 1;
        self.trace.clicks.click_details.push(ClickDetail {
            x,
            y,
            selector,
            timestamp: now,
        });
    }

    fn on_input(&mut self, path: &[DomNode], value: String, now: TimestampMs) {
        let Some(target) = text_field(path) else {
            trace!("input on non-text field ignored");
            return;
        };
        let selector = field_selector(path);
        let field = field_key(target, &selector);
        self.timers.schedule(&field, &selector, &value, now);
        self.trace.input_changes.push(InputChange {
            element_selector: selector,
            value,
            timestamp: now,
            action: Some(InputPhase::Intermediate),
        });
    }

    fn on_focus_change(
        &mut self,
        path: &[DomNode],
        kind: FocusKind,
        value: Option<String>,
        now: TimestampMs,
    ) {
        let Some(target) = text_field(path) else {
            return;
        };
        let selector = field_selector(path);
        let field = field_key(target, &selector);
        self.trace.focus_changes.push(FocusChange {
            element_selector: selector.clone(),
            kind,
            timestamp: now,
        });

        if kind == FocusKind::Blur {
            if let Some(pending) = self.timers.force_flush(&field) {
                let value = value.unwrap_or(pending.value);
                self.trace.input_changes.push(InputChange {
                    element_selector: selector,
                    value,
                    timestamp: now,
                    action: Some(InputPhase::Complete),
                });
            }
        }
    }

    fn on_form_control(
        &mut self,
        path: &[DomNode],
        value: String,
        checked: Option<bool>,
        option_text: Option<String>,
        now: TimestampMs,
    ) {
        let Some(target) = path.iter().find_map(DomNode::as_element) else {
            return;
        };
        let Some(kind) = control_kind(target) else {
            debug!(tag = %target.tag, "change on unsupported control ignored");
            return;
        };
        let selector = field_selector(path);
        let change = match kind {
            ControlKind::Checkbox | ControlKind::Radio => FormElementChange {
                element_selector: selector,
                kind,
                value: if value.is_empty() {
                    "on".to_string()
                } else {
                    value
                },
                checked: Some(checked.unwrap_or(false)),
                text: None,
                timestamp: now,
            },
            ControlKind::Select => FormElementChange {
                element_selector: selector,
                kind,
                value,
                checked: None,
                text: option_text,
                timestamp: now,
            },
        };
        self.trace.form_element_changes.push(change);
    }

    fn now(&mut self) -> TimestampMs {
        let now = self.clock.now_ms().max(self.last_timestamp);
        self.last_timestamp = now;
        now
    }

    fn fire_due(&mut self, now: TimestampMs) {
        for pending in self.timers.take_due(now) {
            let at = pending.due_at;
            self.push_complete(pending, at);
        }
    }

    fn flush_pending(&mut self, now: TimestampMs) {
        for pending in self.timers.flush_all() {
            self.push_complete(pending, now);
        }
    }

    fn push_complete(&mut self, pending: PendingCompletion, at: TimestampMs) {
        self.trace.input_changes.push(InputChange {
            element_selector: pending.selector,
            value: pending.value,
            timestamp: at,
            action: Some(InputPhase::Complete),
        });
    }

    fn sample_mouse(&mut self, now: TimestampMs) {
        if !self.config.mouse_movement {
            return;
        }
        let Some(next_at) = self.mouse.next_sample_at else {
            return;
        };
        if now < next_at {
            return;
        }
        if let Some(latest) = self.mouse.latest {
            let moved = match self.trace.mouse_movements.last() {
                None => true,
                Some(prev) => prev.x != latest.x && prev.y != latest.y,
            };
            if moved {
                self.trace.mouse_movements.push(latest);
            }
        }
        let interval = self.config.mouse_sample_interval_ms();
        let behind = now.saturating_sub(next_at) / interval + 1;
        self.mouse.next_sample_at = Some(next_at.saturating_add(behind.saturating_mul(interval)));
    }

    /// Settle pending input and show the handler a copy of the buffer. The
    /// buffer is never cleared here: the full session still goes out at stop.
    fn checkpoint(&mut self, now: TimestampMs) {
        self.flush_pending(now);
        let mut snapshot = self.trace.clone();
        if self.config.time_count {
            snapshot.time.current_time = now;
        }
        debug!(session = %self.session, "checkpoint delivered");
        self.config.process_data.deliver(&snapshot);
    }

    fn deliver(&mut self, now: TimestampMs) -> RawTrace {
        if self.config.time_count {
            self.trace.time.current_time = now;
        }
        let snapshot = if self.config.clear_after_process {
            let keep_time = self.trace.time;
            let keep_user = self.trace.user_info.clone();
            let taken = std::mem::take(&mut self.trace);
            self.trace.time = keep_time;
            self.trace.user_info = keep_user;
            taken
        } else {
            self.trace.clone()
        };
        self.config.process_data.deliver(&snapshot);
        snapshot
    }
}

fn text_field(path: &[DomNode]) -> Option<&ElementInfo> {
    path.iter()
        .find_map(DomNode::as_element)
        .filter(|el| el.is_text_like())
}

fn field_key(target: &ElementInfo, selector: &str) -> String {
    target
        .id()
        .map(str::to_string)
        .unwrap_or_else(|| selector.to_string())
}

fn control_kind(el: &ElementInfo) -> Option<ControlKind> {
    if el.is_tag("select") {
        return Some(ControlKind::Select);
    }
    if !el.is_tag("input") {
        return None;
    }
    if el.has_input_type("checkbox") {
        Some(ControlKind::Checkbox)
    } else if el.has_input_type("radio") {
        Some(ControlKind::Radio)
    } else {
        None
    }
}
