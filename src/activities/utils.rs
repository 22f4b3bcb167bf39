use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::activities::models::{ActivityRecord, LocalizedActivity, ParsedActivities, RunLogEntry};
use crate::config::SummaryConfig;
use crate::error::SummaryError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Turn an untyped JSON document into activity records.
///
/// The document must be an array. Each element is decoded on its own, so a
/// bad element only costs that element.
pub fn parse_activities(value: &Value) -> Result<ParsedActivities, SummaryError> {
    let items = value.as_array().ok_or_else(|| {
        SummaryError::InvalidInput(format!(
            "expected an array of activity records, got {}",
            json_kind(value)
        ))
    })?;

    if !items.is_empty() && !items.iter().any(Value::is_object) {
        return Err(SummaryError::InvalidInput(
            "no element of the array is an activity record".to_string(),
        ));
    }

    let mut parsed = ParsedActivities::default();

    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<ActivityRecord>(item.clone()) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                warn!(index, "Skipping malformed activity record: {}", e);
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        parsed = parsed.records.len(),
        skipped = parsed.skipped,
        "Parsed activity records"
    );

    Ok(parsed)
}

/// Parse a provider timestamp. Timestamps without an offset are read as UTC.
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Attach the local start time to a record.
///
/// Fails for records that cannot take part in aggregation: an unparsable
/// timestamp or a negative distance.
pub fn localize(
    record: &ActivityRecord,
    offset: FixedOffset,
) -> Result<LocalizedActivity<'_>, String> {
    if record.distance_meters < 0.0 || !record.distance_meters.is_finite() {
        return Err(format!("invalid distance {}", record.distance_meters));
    }

    let utc = parse_utc_timestamp(&record.start_time_utc)
        .ok_or_else(|| format!("unparsable timestamp {:?}", record.start_time_utc))?;

    Ok(LocalizedActivity {
        record,
        local_date_time: utc.with_timezone(&offset),
    })
}

/// Format seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a pace as `M:SS` per kilometer, or `None` for zero distance.
pub fn format_pace(moving_time_seconds: u64, distance_meters: f64) -> Option<String> {
    if distance_meters <= 0.0 {
        return None;
    }

    let pace = (moving_time_seconds as f64 / 60.0) / (distance_meters / 1000.0);
    let minutes = pace.trunc();
    let seconds = ((pace - minutes) * 60.0).trunc();

    Some(format!("{}:{:02}", minutes as u64, seconds as u64))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// List qualifying runs newest first, formatted for display.
pub fn run_log(activities: &[ActivityRecord], config: &SummaryConfig) -> Vec<RunLogEntry> {
    let mut runs: Vec<LocalizedActivity> = activities
        .iter()
        .filter(|a| a.activity_type == config.activity_type)
        .filter_map(|a| match localize(a, config.utc_offset) {
            Ok(localized) => Some(localized),
            Err(e) => {
                warn!(name = %a.name, "Skipping run in log: {}", e);
                None
            }
        })
        .filter(|a| in_target_year(a, config.target_year))
        .collect();

    runs.sort_by(|a, b| b.local_date_time.cmp(&a.local_date_time));

    runs.into_iter()
        .map(|run| RunLogEntry {
            local_date: run.local_date_time.format("%Y-%m-%d %H:%M").to_string(),
            name: run.record.name.clone(),
            distance_km: round2(run.record.distance_km()),
            moving_time: format_duration(run.record.moving_time_seconds),
            pace: format_pace(run.record.moving_time_seconds, run.record.distance_meters),
        })
        .collect()
}

pub fn in_target_year(activity: &LocalizedActivity, target_year: Option<i32>) -> bool {
    target_year.map_or(true, |year| activity.local_date_time.year() == year)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
