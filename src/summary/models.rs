use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Per-request overrides for the configured aggregation parameters.
#[derive(Debug, Default, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Minutes east of UTC used for local-time bucketing.
    #[validate(range(min = -720, max = 840))]
    pub offset_minutes: Option<i32>,
    /// Keep only runs from this local calendar year.
    #[validate(range(min = 1970, max = 9999))]
    pub year: Option<i32>,
    /// Local date the current streak is measured against (YYYY-MM-DD).
    #[param(value_type = Option<String>, example = "2025-01-04")]
    pub today: Option<NaiveDate>,
    /// Name printed on the poster.
    #[validate(length(max = 100))]
    pub athlete: Option<String>,
}

/// Payload consumed by the poster renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PosterData {
    pub athlete: String,
    pub total_runs: u32,
    pub total_distance_km: f64,
    /// Kilometers per `YYYY-MM`, chronological.
    pub monthly: BTreeMap<String, f64>,
    pub current_streak: u32,
    pub max_streak: u32,
    pub early_bird_count: u32,
    pub night_owl_count: u32,
    pub trends: Vec<String>,
}
