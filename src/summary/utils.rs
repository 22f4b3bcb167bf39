use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::models::{PosterData, SummaryQuery};
use crate::activities::utils::round2;
use crate::aggregate::models::SummaryStatistics;
use crate::config::SummaryConfig;
use crate::error::ConfigError;

const DEFAULT_ATHLETE: &str = "Athlete";

/// Apply query overrides on top of the server configuration.
///
/// Returns the effective config and the date streaks are measured against.
pub fn resolve_config(
    base: &SummaryConfig,
    query: &SummaryQuery,
) -> Result<(SummaryConfig, NaiveDate), ConfigError> {
    let mut config = base.clone();

    if let Some(minutes) = query.offset_minutes {
        config = config.with_offset_minutes(minutes)?;
    }
    if query.year.is_some() {
        config = config.with_target_year(query.year);
    }

    let today = query.today.unwrap_or_else(|| config.today());

    Ok((config, today))
}

/// Month with the most kilometers. The earliest month wins a tie.
pub fn peak_month(monthly: &BTreeMap<String, f64>) -> Option<(&str, f64)> {
    let mut peak: Option<(&str, f64)> = None;

    for (month, &km) in monthly {
        if km > peak.map_or(0.0, |(_, top)| top) {
            peak = Some((month.as_str(), km));
        }
    }

    peak
}

pub fn build_poster(athlete: Option<&str>, summary: &SummaryStatistics) -> PosterData {
    let athlete = athlete
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ATHLETE)
        .to_string();

    let monthly: BTreeMap<String, f64> = summary
        .monthly_breakdown
        .iter()
        .map(|(month, stats)| (month.clone(), round2(stats.distance_km)))
        .collect();

    let mut trends = vec![format!(
        "Favorite day: {} ({} runs)",
        summary.favorite_weekday, summary.favorite_weekday_count
    )];

    if let Some((month, km)) = peak_month(&monthly) {
        trends.push(format!("Peak month: {} - {} km", month, km));
    }

    trends.push(format!(
        "Average pace: {} min/km",
        round2(summary.average_pace_min_per_km)
    ));

    PosterData {
        athlete,
        total_runs: summary.total_count,
        total_distance_km: round2(summary.total_distance_km),
        monthly,
        current_streak: summary.current_streak,
        max_streak: summary.max_streak,
        early_bird_count: summary.early_count,
        night_owl_count: summary.night_count,
        trends,
    }
}
