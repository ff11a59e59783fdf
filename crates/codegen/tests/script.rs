use playscribe_codegen::{generate_script, write_script, ScriptMeta, ScriptOptions};
use playscribe_core_types::{
    Assertion, AssertionKind, ClickDetail, ControlKind, FormElementChange, InputChange, InputPhase,
    RawTrace, UserInfo, Viewport,
};
use playscribe_timeline::{preprocess, PreprocessPolicy, Timeline};
use pretty_assertions::assert_eq;

const URL: &str = "https://example.test";

fn click(trace: &mut RawTrace, selector: &str, at: i64) {
    trace.clicks.click_count += 1;
    trace.clicks.click_details.push(ClickDetail {
        x: 1.0,
        y: 2.0,
        selector: selector.to_string(),
        timestamp: at,
    });
}

fn fill(trace: &mut RawTrace, selector: &str, value: &str, at: i64) {
    trace.input_changes.push(InputChange {
        element_selector: selector.to_string(),
        value: value.to_string(),
        timestamp: at,
        action: Some(InputPhase::Complete),
    });
}

fn render(trace: &RawTrace) -> String {
    let timeline = preprocess(trace, &PreprocessPolicy::default());
    generate_script(
        URL,
        &timeline,
        &ScriptMeta::from_trace(trace),
        &ScriptOptions::default(),
    )
}

/// Contents of the single-quoted literal opening at `start`, or `None` when
/// the literal is unterminated.
fn literal_at(line: &str, start: usize) -> Option<(String, usize)> {
    let mut chars = line[start..].char_indices();
    let mut out = String::new();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                let (_, escaped) = chars.next()?;
                out.push(escaped);
            }
            '\'' => return Some((out, start + offset + 1)),
            other => out.push(other),
        }
    }
    None
}

#[test]
fn renders_full_script_in_timeline_order() {
    let mut trace = RawTrace::new();
    trace.user_info = Some(UserInfo {
        window_size: [1024, 768],
        ..UserInfo::default()
    });
    click(&mut trace, "html>body>main>button#go", 1_000);
    fill(&mut trace, "#q", "it's", 1_050);
    trace.form_element_changes.push(FormElementChange {
        element_selector: "#agree".into(),
        kind: ControlKind::Checkbox,
        value: "on".into(),
        checked: Some(true),
        text: None,
        timestamp: 1_300,
    });

    let expected = r#"import { test, expect } from '@playwright/test';

test('User interaction replay', async ({ page }) => {
  // Navigate to the page
  await page.goto('https://example.test');

  // Wait for page to load
  await page.waitForLoadState('networkidle');

  // Set viewport size to match recorded session
  await page.setViewportSize({ width: 1024, height: 768 });

  // Click 1: #go
  const element1 = page.locator('#go');
  await element1.waitFor({ state: 'visible' });
  await element1.click();

  // Fill input: #q
  await page.locator('#q').fill('it\'s');

  // Wait 250ms (matching user timing)
  await page.waitForTimeout(250);

  // Check checkbox: #agree
  await page.locator('#agree').check();

  await page.waitForTimeout(2500);
});
"#;
    assert_eq!(render(&trace), expected);
}

#[test]
fn empty_trace_renders_minimal_script() {
    let script = render(&RawTrace::new());
    let expected = r#"import { test, expect } from '@playwright/test';

test('User interaction replay', async ({ page }) => {
  // Navigate to the page
  await page.goto('https://example.test');

  // Wait for page to load
  await page.waitForLoadState('networkidle');

  // No interactions were recorded
  console.log('No user interactions to replay');
});
"#;
    assert_eq!(script, expected);
    assert!(!script.contains(".click()"));
    assert!(!script.contains("setViewportSize"));
}

#[test]
fn fill_value_is_one_well_formed_literal() {
    let mut trace = RawTrace::new();
    fill(&mut trace, "#note", "a 'quoted'\nline \\ end", 0);
    let script = render(&trace);
    let line = script
        .lines()
        .find(|line| line.contains(".fill("))
        .expect("fill statement");
    let open = line.find(".fill('").unwrap() + ".fill('".len();
    let (value, end) = literal_at(line, open).expect("terminated literal");
    assert_eq!(value, "a 'quoted'nline \\ end");
    assert_eq!(&line[end..], ");");
}

#[test]
fn select_and_assertions_render_their_checks() {
    let mut trace = RawTrace::new();
    trace.form_element_changes.push(FormElementChange {
        element_selector: "#size".into(),
        kind: ControlKind::Select,
        value: "m".into(),
        checked: None,
        text: Some("Medium".into()),
        timestamp: 0,
    });
    for (kind, value, at) in [
        (AssertionKind::IsVisible, None, 50),
        (AssertionKind::HasText, Some("Saved"), 60),
        (AssertionKind::IsChecked, None, 70),
        (AssertionKind::IsNotChecked, None, 80),
    ] {
        trace.assertions.push(Assertion {
            selector: "#status".into(),
            kind,
            value: value.map(str::to_string),
            timestamp: at,
        });
    }
    let script = render(&trace);
    assert!(script.contains(
        "  // Select option: Medium in #size\n  await page.locator('#size').selectOption('m');\n"
    ));
    assert!(script.contains("await expect(page.locator('#status')).toBeVisible();"));
    assert!(script.contains("await expect(page.locator('#status')).toHaveText('Saved');"));
    assert!(script.contains("await expect(page.locator('#status')).toBeChecked();"));
    assert!(script.contains("await expect(page.locator('#status')).not.toBeChecked();"));
    assert!(!script.contains("matching user timing"));
}

#[test]
fn empty_selector_skips_locate_step() {
    let mut trace = RawTrace::new();
    click(&mut trace, "", 0);
    let script = render(&trace);
    assert!(script.contains("// Skipped step 1: no selector was recorded"));
    assert!(!script.contains("page.locator"));
}

#[test]
fn extreme_timestamps_cap_the_wait() {
    let mut trace = RawTrace::new();
    click(&mut trace, "#a", -i64::MAX);
    click(&mut trace, "#b", i64::MAX);
    let script = render(&trace);
    assert!(script.contains(&format!("Wait {}ms (matching user timing)", i64::MAX)));
    assert!(script.contains("page.locator('#a')"));
    assert!(script.contains("page.locator('#b')"));
}

#[test]
fn pacing_can_be_disabled() {
    let mut trace = RawTrace::new();
    click(&mut trace, "#a", 0);
    click(&mut trace, "#b", 5_000);
    let timeline = preprocess(&trace, &PreprocessPolicy::default());
    let options = ScriptOptions {
        render_pacing: false,
        settle_wait_ms: 0,
        ..ScriptOptions::default()
    };
    let script = generate_script(URL, &timeline, &ScriptMeta::default(), &options);
    assert!(!script.contains("matching user timing"));
    assert!(script.contains("await page.waitForTimeout(0);"));
}

#[test]
fn rendering_is_deterministic_and_pure() {
    let mut trace = RawTrace::new();
    click(&mut trace, "#a", 0);
    fill(&mut trace, "#b", "x", 400);
    let timeline = preprocess(&trace, &PreprocessPolicy::default());
    let snapshot: Timeline = timeline.clone();
    let meta = ScriptMeta::default().with_viewport(Viewport {
        width: 800,
        height: 600,
    });
    let first = generate_script(URL, &timeline, &meta, &ScriptOptions::default());
    let second = generate_script(URL, &timeline, &meta, &ScriptOptions::default());
    assert_eq!(first, second);
    assert_eq!(timeline, snapshot);
}

#[test]
fn writes_script_to_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tests").join("replay.spec.ts");
    let script = render(&RawTrace::new());
    let written = write_script(&path, &script).unwrap();
    assert_eq!(std::fs::read_to_string(written).unwrap(), script);
}
