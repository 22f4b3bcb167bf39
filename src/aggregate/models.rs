use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Derived running statistics for one batch of activities.
///
/// `monthly_breakdown` is keyed by zero-padded `YYYY-MM`, so iteration and
/// serialization are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryStatistics {
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub total_count: u32,
    pub monthly_breakdown: BTreeMap<String, MonthlyStats>,
    pub fastest: Option<RunHighlight>,
    pub longest: RunHighlight,
    pub early_count: u32,
    pub night_count: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    #[schema(example = "Saturday")]
    pub favorite_weekday: String,
    pub favorite_weekday_count: u32,
    pub average_pace_min_per_km: f64,
    /// Input records dropped as malformed during this call.
    pub skipped_records: usize,
}

/// Outcome of summarizing a raw document.
///
/// `skipped_records` is kept even when no run survives.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub statistics: Option<SummaryStatistics>,
    pub skipped_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStats {
    pub distance_km: f64,
    pub count: u32,
    pub time_seconds: u64,
}

/// Display block for a single notable run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RunHighlight {
    pub name: String,
    pub distance_km: f64,
    pub moving_time_seconds: u64,
    /// `None` when the run has no distance.
    pub pace_min_per_km: Option<f64>,
    pub local_date_time: NaiveDateTime,
    #[schema(example = "03 Jan 2025, 06:30 AM")]
    pub display_date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub current: u32,
    pub max: u32,
}
