use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// One logged exercise session, as delivered by the provider.
///
/// Provider field names (`type`, `start_date`, `distance`, `moving_time`)
/// are accepted as aliases. Missing or `null` fields fall back to empty/zero
/// values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ActivityRecord {
    #[serde(default, alias = "type", deserialize_with = "null_as_default")]
    pub activity_type: String,
    /// RFC 3339 timestamp in UTC, e.g. `2025-01-03T01:00:00Z`.
    #[serde(default, alias = "start_date", deserialize_with = "null_as_default")]
    pub start_time_utc: String,
    #[serde(default, alias = "distance", deserialize_with = "null_as_default")]
    pub distance_meters: f64,
    #[serde(default, alias = "moving_time", deserialize_with = "null_as_default")]
    pub moving_time_seconds: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ActivityRecord {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

/// A record together with its start time at the target offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedActivity<'a> {
    pub record: &'a ActivityRecord,
    pub local_date_time: DateTime<FixedOffset>,
}

/// Records that survived per-record parsing, plus the number dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedActivities {
    pub records: Vec<ActivityRecord>,
    pub skipped: usize,
}

/// One row of the run listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RunLogEntry {
    #[schema(example = "2025-01-03 06:30")]
    pub local_date: String,
    pub name: String,
    pub distance_km: f64,
    #[schema(example = "00:30:00")]
    pub moving_time: String,
    /// Minutes and seconds per kilometer; absent for zero-distance runs.
    #[schema(example = "6:00")]
    pub pace: Option<String>,
}
