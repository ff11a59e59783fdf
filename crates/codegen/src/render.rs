use playscribe_core_types::{AssertionKind, ControlKind};
use playscribe_timeline::{CanonicalEvent, EventPayload, Timeline};
use tracing::debug;

use crate::escape::{comment, js_string};
use crate::options::{ScriptMeta, ScriptOptions};

const INDENT: &str = "  ";

/// Render `timeline` as a Playwright test that opens `url`.
///
/// An empty timeline still yields a runnable test that navigates and waits
/// for the page, with a visible note that nothing was recorded.
pub fn generate_script(
    url: &str,
    timeline: &Timeline,
    meta: &ScriptMeta,
    options: &ScriptOptions,
) -> String {
    let mut script = Script::new();
    script.raw("import { test, expect } from '@playwright/test';");
    script.blank();
    script.raw(&format!(
        "test('{}', async ({{ page }}) => {{",
        js_string(&options.title)
    ));
    script.step("Navigate to the page", &[format!("await page.goto('{}');", js_string(url))]);
    script.step(
        "Wait for page to load",
        &["await page.waitForLoadState('networkidle');".to_string()],
    );

    if timeline.is_empty() {
        debug!(url, "rendering script for empty timeline");
        script.step(
            "No interactions were recorded",
            &["console.log('No user interactions to replay');".to_string()],
        );
        script.raw("});");
        return script.finish();
    }

    script.step(
        "Set viewport size to match recorded session",
        &[format!(
            "await page.setViewportSize({{ width: {}, height: {} }});",
            meta.viewport.width, meta.viewport.height
        )],
    );

    let mut previous: Option<i64> = None;
    for (idx, event) in timeline.iter().enumerate() {
        if let Some(prev) = previous {
            let gap = event.timestamp_ms().saturating_sub(prev);
            if options.render_pacing && gap > options.pacing_threshold_ms {
                script.step(
                    &format!("Wait {}ms (matching user timing)", gap),
                    &[format!("await page.waitForTimeout({});", gap)],
                );
            }
        }
        previous = Some(event.timestamp_ms());
        render_event(&mut script, idx + 1, event);
    }

    script.blank();
    script.line(&format!("await page.waitForTimeout({});", options.settle_wait_ms));
    script.raw("});");
    debug!(url, events = timeline.len(), "script rendered");
    script.finish()
}

fn render_event(script: &mut Script, number: usize, event: &CanonicalEvent) {
    let selector = event.selector().as_str();
    if selector.is_empty() {
        script.step(
            &format!("Skipped step {}: no selector was recorded", number),
            &[],
        );
        return;
    }
    let target = js_string(selector);

    match event.payload() {
        EventPayload::Click { .. } => {
            let handle = format!("element{}", number);
            script.step(
                &format!("Click {}: {}", number, selector),
                &[
                    format!("const {} = page.locator('{}');", handle, target),
                    format!("await {}.waitFor({{ state: 'visible' }});", handle),
                    format!("await {}.click();", handle),
                ],
            );
        }
        EventPayload::Input { value } => {
            script.step(
                &format!("Fill input: {}", selector),
                &[format!(
                    "await page.locator('{}').fill('{}');",
                    target,
                    js_string(value)
                )],
            );
        }
        EventPayload::FormControl {
            control,
            value,
            checked,
            option_text,
        } => match control {
            ControlKind::Checkbox | ControlKind::Radio => {
                let (verb, call) = if checked.unwrap_or(false) {
                    ("Check", "check")
                } else {
                    ("Uncheck", "uncheck")
                };
                script.step(
                    &format!("{} {}: {}", verb, control.as_str(), selector),
                    &[format!("await page.locator('{}').{}();", target, call)],
                );
            }
            ControlKind::Select => {
                let label = option_text
                    .as_deref()
                    .filter(|text| !text.is_empty())
                    .unwrap_or(value.as_str());
                script.step(
                    &format!("Select option: {} in {}", label, selector),
                    &[format!(
                        "await page.locator('{}').selectOption('{}');",
                        target,
                        js_string(value)
                    )],
                );
            }
        },
        EventPayload::Assertion {
            assertion,
            expected,
        } => {
            let locator = format!("expect(page.locator('{}'))", target);
            let (note, check) = match assertion {
                AssertionKind::IsVisible => ("Assert element is visible", "toBeVisible()".to_string()),
                AssertionKind::HasText => (
                    "Assert element has text",
                    format!(
                        "toHaveText('{}')",
                        js_string(expected.as_deref().unwrap_or_default())
                    ),
                ),
                AssertionKind::IsChecked => {
                    ("Assert checkbox/radio is checked", "toBeChecked()".to_string())
                }
                AssertionKind::IsNotChecked => (
                    "Assert checkbox/radio is not checked",
                    "not.toBeChecked()".to_string(),
                ),
            };
            script.step(
                &format!("{}: {}", note, selector),
                &[format!("await {}.{};", locator, check)],
            );
        }
    }
}

/// Line-oriented builder. Every step is a comment followed by its statements,
/// separated from the previous step by a blank line unless it opens a block.
struct Script {
    out: String,
}

impl Script {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(INDENT);
        self.raw(text);
    }

    fn step(&mut self, note: &str, statements: &[String]) {
        if !self.out.ends_with("{\n") {
            self.blank();
        }
        self.line(&format!("// {}", comment(note)));
        for statement in statements {
            self.line(statement);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
