use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use models::{SummaryReport, SummaryStatistics};

use crate::activities::models::{ActivityRecord, LocalizedActivity};
use crate::activities::utils::{in_target_year, localize, parse_activities};
use crate::config::SummaryConfig;
use crate::error::SummaryError;

pub mod models;
pub mod utils;

/// Summarize typed activity records.
///
/// `today` is the local calendar date used to decide whether the latest
/// streak is still alive. Returns `None` when no qualifying run remains.
pub fn summarize(
    activities: &[ActivityRecord],
    config: &SummaryConfig,
    today: NaiveDate,
) -> Option<SummaryStatistics> {
    summarize_records(activities, config, today, 0).statistics
}

/// Summarize an untyped JSON document (an array of activity records).
///
/// Fails only when the document is not a list of records at all.
/// Individual malformed records are skipped and counted.
pub fn summarize_value(
    input: &Value,
    config: &SummaryConfig,
    today: NaiveDate,
) -> Result<Option<SummaryStatistics>, SummaryError> {
    summarize_report(input, config, today).map(|report| report.statistics)
}

/// Like [`summarize_value`], but keeps the skip count when no run survives.
pub fn summarize_report(
    input: &Value,
    config: &SummaryConfig,
    today: NaiveDate,
) -> Result<SummaryReport, SummaryError> {
    let parsed = parse_activities(input)?;

    Ok(summarize_records(
        &parsed.records,
        config,
        today,
        parsed.skipped,
    ))
}

fn summarize_records(
    activities: &[ActivityRecord],
    config: &SummaryConfig,
    today: NaiveDate,
    already_skipped: usize,
) -> SummaryReport {
    let mut skipped = already_skipped;
    let mut runs: Vec<LocalizedActivity> = Vec::new();

    for activity in activities
        .iter()
        .filter(|a| a.activity_type == config.activity_type)
    {
        match localize(activity, config.utc_offset) {
            Ok(run) => {
                if in_target_year(&run, config.target_year) {
                    runs.push(run);
                }
            }
            Err(e) => {
                warn!(name = %activity.name, "Skipping malformed run: {}", e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        info!("Skipped {} malformed activities", skipped);
    }

    if runs.is_empty() {
        info!(skipped, "No runs found");
    }

    SummaryReport {
        statistics: compute_statistics(&runs, today, skipped),
        skipped_records: skipped,
    }
}

fn compute_statistics(
    runs: &[LocalizedActivity],
    today: NaiveDate,
    skipped: usize,
) -> Option<SummaryStatistics> {
    let longest = utils::select_longest(runs)?;
    let fastest = utils::select_fastest(runs);

    let total_meters: f64 = runs.iter().map(|r| r.record.distance_meters).sum();
    let total_seconds = runs
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.record.moving_time_seconds));
    let total_distance_km = total_meters / 1000.0;
    let total_time_hours = total_seconds as f64 / 3600.0;

    let dates: BTreeSet<NaiveDate> = runs.iter().map(utils::local_date).collect();
    let streaks = utils::compute_streaks(&dates, today);

    let (favorite_day, favorite_count) =
        utils::favorite_weekday(runs.iter().map(utils::local_weekday))?;

    let hours: Vec<u32> = runs.iter().map(utils::local_hour).collect();

    let average_pace_min_per_km = if total_distance_km > 0.0 {
        (total_time_hours * 60.0) / total_distance_km
    } else {
        0.0
    };

    info!(runs = runs.len(), "Analysis completed");

    Some(SummaryStatistics {
        total_distance_km,
        total_time_hours,
        total_count: runs.len() as u32,
        monthly_breakdown: utils::monthly_breakdown(runs),
        fastest: fastest.map(utils::highlight),
        longest: utils::highlight(longest),
        early_count: hours.iter().filter(|&&h| utils::is_early(h)).count() as u32,
        night_count: hours.iter().filter(|&&h| utils::is_night(h)).count() as u32,
        current_streak: streaks.current,
        max_streak: streaks.max,
        favorite_weekday: utils::weekday_name(favorite_day).to_string(),
        favorite_weekday_count: favorite_count,
        average_pace_min_per_km,
        skipped_records: skipped,
    })
}
