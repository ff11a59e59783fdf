use chrono::{TimeZone, Utc};
use playscribe_core_types::{
    Assertion, AssertionKind, ClickDetail, ControlKind, FormElementChange, InputChange, InputPhase,
    RawTrace,
};
use playscribe_selector::canonicalize;
use playscribe_timeline::export::jsonl::{build_lines, serialize_lines, write_lines};
use playscribe_timeline::{
    preprocess, preprocess_with_report, EventCategory, EventPayload, PreprocessPolicy, TlError,
};
use pretty_assertions::assert_eq;

fn click(selector: &str, at: i64) -> ClickDetail {
    ClickDetail {
        x: 10.0,
        y: 20.0,
        selector: selector.to_string(),
        timestamp: at,
    }
}

fn push_click(trace: &mut RawTrace, selector: &str, at: i64) {
    trace.clicks.click_count += 1;
    trace.clicks.click_details.push(click(selector, at));
}

fn checkbox(selector: &str, checked: bool, at: i64) -> FormElementChange {
    FormElementChange {
        element_selector: selector.to_string(),
        kind: ControlKind::Checkbox,
        value: "on".to_string(),
        checked: Some(checked),
        text: None,
        timestamp: at,
    }
}

fn summary(trace: &RawTrace, policy: &PreprocessPolicy) -> Vec<(EventCategory, String, i64)> {
    preprocess(trace, policy)
        .iter()
        .map(|event| {
            (
                event.category(),
                event.selector().to_string(),
                event.timestamp_ms(),
            )
        })
        .collect()
}

/// A trace touching every channel, used for determinism checks.
fn busy_trace() -> RawTrace {
    let mut trace = RawTrace::new();
    push_click(&mut trace, "html>body>div.card>button#save", 500);
    push_click(&mut trace, "html>body>main>section>a.nav", 1_200);
    push_click(&mut trace, "html>body>main>section>a.nav", 1_350);
    push_click(&mut trace, "html>body>form>label>input#agree", 2_000);
    trace.form_element_changes.push(checkbox("#agree", true, 2_010));
    trace.form_element_changes.push(FormElementChange {
        element_selector: "#size".into(),
        kind: ControlKind::Select,
        value: "m".into(),
        checked: None,
        text: Some("Medium".into()),
        timestamp: 2_500,
    });
    trace.input_changes.push(InputChange {
        element_selector: "#email".into(),
        value: "a@b.test".into(),
        timestamp: 3_000,
        action: Some(InputPhase::Intermediate),
    });
    trace.input_changes.push(InputChange {
        element_selector: "#email".into(),
        value: "a@b.test".into(),
        timestamp: 5_000,
        action: Some(InputPhase::Complete),
    });
    trace.assertions.push(Assertion {
        selector: "#save".into(),
        kind: AssertionKind::IsVisible,
        value: None,
        timestamp: 600,
    });
    trace
}

#[test]
fn rapid_clicks_coalesce_per_selector() {
    let mut trace = RawTrace::new();
    for at in [0, 150, 600] {
        push_click(&mut trace, "#go", at);
    }
    let events = summary(&trace, &PreprocessPolicy::default());
    assert_eq!(
        events,
        vec![
            (EventCategory::Click, "#go".to_string(), 0),
            (EventCategory::Click, "#go".to_string(), 600),
        ]
    );
}

#[test]
fn raw_paths_coalesce_after_canonicalization() {
    let mut trace = RawTrace::new();
    push_click(&mut trace, "html>body>div>button#go", 0);
    push_click(&mut trace, "#go", 100);
    let timeline = preprocess(&trace, &PreprocessPolicy::default());
    assert_eq!(timeline.len(), 1);
}

#[test]
fn click_next_to_assertion_is_dropped() {
    let mut trace = RawTrace::new();
    push_click(&mut trace, "#save", 500);
    trace.assertions.push(Assertion {
        selector: "#save".into(),
        kind: AssertionKind::IsVisible,
        value: None,
        timestamp: 600,
    });
    let events = summary(&trace, &PreprocessPolicy::default());
    assert_eq!(
        events,
        vec![(EventCategory::Assertion, "#save".to_string(), 600)]
    );
}

#[test]
fn extreme_timestamps_degrade_instead_of_overflowing() {
    let mut trace = RawTrace::new();
    push_click(&mut trace, "#save", i64::MIN + 1);
    push_click(&mut trace, "#save", i64::MAX);
    trace.assertions.push(Assertion {
        selector: "#save".into(),
        kind: AssertionKind::IsVisible,
        value: None,
        timestamp: i64::MAX,
    });
    trace.form_element_changes.push(checkbox("#agree", true, i64::MIN));
    push_click(&mut trace, "#agree-all", i64::MAX);

    let events = summary(&trace, &PreprocessPolicy::default());
    assert_eq!(
        events,
        vec![
            (EventCategory::FormControl, "#agree".to_string(), i64::MIN),
            (EventCategory::Click, "#save".to_string(), i64::MIN + 1),
            (EventCategory::Click, "#agree-all".to_string(), i64::MAX),
            (EventCategory::Assertion, "#save".to_string(), i64::MAX),
        ]
    );
}

#[test]
fn checkbox_toggle_wins_over_click() {
    let mut trace = RawTrace::new();
    push_click(&mut trace, "#agree", 1_000);
    trace.form_element_changes.push(checkbox("#agree", true, 1_020));
    let (timeline, report) = preprocess_with_report(&trace, &PreprocessPolicy::default());
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.events()[0].category(), EventCategory::FormControl);
    assert_eq!(report.clicks_on_form_controls, 1);
}

#[test]
fn text_input_on_form_control_is_not_filled() {
    let mut trace = RawTrace::new();
    trace.form_element_changes.push(checkbox("#agree", false, 1_000));
    trace.input_changes.push(InputChange {
        element_selector: "#agree".into(),
        value: "on".into(),
        timestamp: 1_100,
        action: Some(InputPhase::Complete),
    });
    let timeline = preprocess(&trace, &PreprocessPolicy::default());
    assert_eq!(timeline.len(), 1);
    match timeline.events()[0].payload() {
        EventPayload::FormControl { checked, .. } => assert_eq!(*checked, Some(false)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ties_order_form_click_input_assertion() {
    let mut trace = RawTrace::new();
    trace.assertions.push(Assertion {
        selector: "#done".into(),
        kind: AssertionKind::HasText,
        value: Some("Saved".into()),
        timestamp: 100,
    });
    trace.input_changes.push(InputChange {
        element_selector: "#name".into(),
        value: "ada".into(),
        timestamp: 100,
        action: None,
    });
    push_click(&mut trace, "a.link", 100);
    trace.form_element_changes.push(checkbox("#terms", true, 100));
    let categories: Vec<EventCategory> = preprocess(&trace, &PreprocessPolicy::default())
        .iter()
        .map(|e| e.category())
        .collect();
    assert_eq!(
        categories,
        vec![
            EventCategory::FormControl,
            EventCategory::Click,
            EventCategory::Input,
            EventCategory::Assertion,
        ]
    );
}

#[test]
fn timeline_is_sorted_and_canonical() {
    let timeline = preprocess(&busy_trace(), &PreprocessPolicy::default());
    let stamps: Vec<i64> = timeline.iter().map(|e| e.timestamp_ms()).collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
    for event in &timeline {
        assert_eq!(canonicalize(event.selector().as_str()), event.selector().as_str());
    }
}

#[test]
fn preprocessing_is_deterministic() {
    let trace = busy_trace();
    let policy = PreprocessPolicy::default();
    let first = serde_json::to_string(&preprocess(&trace, &policy)).unwrap();
    let second = serde_json::to_string(&preprocess(&trace, &policy)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn busy_trace_keeps_expected_steps() {
    let events = summary(&busy_trace(), &PreprocessPolicy::default());
    assert_eq!(
        events,
        vec![
            (EventCategory::Assertion, "#save".to_string(), 600),
            (EventCategory::Click, "section a.nav".to_string(), 1_200),
            (EventCategory::FormControl, "#agree".to_string(), 2_010),
            (EventCategory::FormControl, "#size".to_string(), 2_500),
            (EventCategory::Input, "#email".to_string(), 5_000),
        ]
    );
}

#[test]
fn basic_policy_ignores_optional_channels() {
    let events = summary(&busy_trace(), &PreprocessPolicy::basic());
    assert_eq!(
        events,
        vec![
            (EventCategory::Click, "#save".to_string(), 500),
            (EventCategory::Click, "section a.nav".to_string(), 1_200),
            (EventCategory::Click, "#agree".to_string(), 2_000),
            (EventCategory::Input, "#email".to_string(), 5_000),
        ]
    );
}

#[test]
fn empty_trace_gives_empty_timeline() {
    let timeline = preprocess(&RawTrace::new(), &PreprocessPolicy::default());
    assert!(timeline.is_empty());
}

#[test]
fn jsonl_export_round_trip_to_disk() {
    let timeline = preprocess(&busy_trace(), &PreprocessPolicy::default());
    let generated_at = Utc.timestamp_millis_opt(0).unwrap();
    let lines = build_lines(&timeline, &PreprocessPolicy::default(), generated_at);
    let serialized = serialize_lines(&lines, 16 * 1024).unwrap();
    assert_eq!(serialized.len(), timeline.len() + 2);

    let header: serde_json::Value = serde_json::from_str(&serialized[0]).unwrap();
    assert_eq!(header["type"], "header");
    assert_eq!(header["policy_snapshot"]["multi_click_window_ms"], 300);
    let first_event: serde_json::Value = serde_json::from_str(&serialized[1]).unwrap();
    assert_eq!(first_event["type"], "event");
    assert_eq!(first_event["kind"], "assertion");
    assert_eq!(first_event["assertion"], "isVisible");
    let footer: serde_json::Value = serde_json::from_str(serialized.last().unwrap()).unwrap();
    assert_eq!(footer["total_events"], 5);
    assert_eq!(footer["form_controls"], 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("timeline.jsonl");
    let written = write_lines(&path, &serialized).unwrap();
    let contents = std::fs::read_to_string(written).unwrap();
    assert_eq!(contents.lines().count(), serialized.len());
}

#[test]
fn oversize_lines_are_rejected() {
    let timeline = preprocess(&busy_trace(), &PreprocessPolicy::default());
    let lines = build_lines(&timeline, &PreprocessPolicy::default(), Utc::now());
    let err = serialize_lines(&lines, 8).unwrap_err();
    assert!(matches!(err, TlError::Oversize { line: 0, .. }));
}
