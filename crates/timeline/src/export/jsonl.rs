use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::to_string;

use crate::errors::TlError;
use crate::model::{EventCategory, FooterLine, HeaderLine, JsonlLine, Timeline};
use crate::policy::PreprocessPolicy;

pub const EXPORT_VERSION: &str = "1";
pub const DEFAULT_MAX_LINE_BYTES: usize = 16 * 1024;

/// Header, one line per event, footer.
pub fn build_lines(
    timeline: &Timeline,
    policy: &PreprocessPolicy,
    generated_at: DateTime<Utc>,
) -> Vec<JsonlLine> {
    let mut lines = Vec::with_capacity(timeline.len() + 2);
    lines.push(JsonlLine::Header(HeaderLine {
        export_version: EXPORT_VERSION,
        generated_at,
        policy_snapshot: serde_json::to_value(policy).unwrap_or_default(),
    }));
    lines.extend(timeline.iter().cloned().map(JsonlLine::Event));
    lines.push(JsonlLine::Footer(FooterLine {
        total_events: timeline.len(),
        clicks: timeline.count(EventCategory::Click),
        inputs: timeline.count(EventCategory::Input),
        form_controls: timeline.count(EventCategory::FormControl),
        assertions: timeline.count(EventCategory::Assertion),
    }));
    lines
}

pub fn serialize_lines(lines: &[JsonlLine], max_line_bytes: usize) -> Result<Vec<String>, TlError> {
    let mut serialized = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let json = to_string(line)?;
        if json.len() > max_line_bytes {
            return Err(TlError::Oversize {
                line: idx,
                bytes: json.len(),
                budget: max_line_bytes,
            });
        }
        serialized.push(json);
    }
    Ok(serialized)
}

pub fn write_lines(base_path: &Path, lines: &[String]) -> Result<PathBuf, TlError> {
    if let Some(parent) = base_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(base_path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(base_path.components().collect())
}
