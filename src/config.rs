//! Application configuration loaded from environment variables.
//!
//! Values can also come from a `.env` file in the working directory.

use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::error::ConfigError;

/// Smallest UTC offset in use anywhere (UTC-12:00).
pub const MIN_OFFSET_MINUTES: i32 = -12 * 60;
/// Largest UTC offset in use anywhere (UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

const DEFAULT_OFFSET_MINUTES: i32 = 5 * 60 + 30;
const DEFAULT_ACTIVITY_TYPE: &str = "Run";

/// Parameters for a single aggregation call.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Offset used for day/hour/month bucketing.
    pub utc_offset: FixedOffset,
    /// Only records with this `activity_type` take part.
    pub activity_type: String,
    /// Keep only runs whose local start date falls in this year.
    pub target_year: Option<i32>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            utc_offset: offset_from_minutes(DEFAULT_OFFSET_MINUTES).unwrap_or_else(|_| Utc.fix()),
            activity_type: DEFAULT_ACTIVITY_TYPE.to_string(),
            target_year: None,
        }
    }
}

impl SummaryConfig {
    pub fn with_offset_minutes(mut self, minutes: i32) -> Result<Self, ConfigError> {
        self.utc_offset = offset_from_minutes(minutes)?;
        Ok(self)
    }

    pub fn with_target_year(mut self, year: Option<i32>) -> Self {
        self.target_year = year;
        self
    }

    /// Today's calendar date at the configured offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

/// Server and aggregation settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_seconds: u64,
    pub rate_limit_burst: u32,
    pub summary: SummaryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit_seconds: 5,
            rate_limit_burst: 10,
            summary: SummaryConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = AppConfig::default();

        let offset_minutes =
            parse_var("SUMMARY_UTC_OFFSET_MINUTES")?.unwrap_or(DEFAULT_OFFSET_MINUTES);
        let summary = SummaryConfig {
            utc_offset: offset_from_minutes(offset_minutes)?,
            activity_type: env::var("SUMMARY_ACTIVITY_TYPE")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_ACTIVITY_TYPE.to_string()),
            target_year: parse_var("SUMMARY_TARGET_YEAR")?,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            rate_limit_seconds: parse_var("RATE_LIMIT_SECONDS_PER_REQUEST")?
                .unwrap_or(defaults.rate_limit_seconds),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST")?.unwrap_or(defaults.rate_limit_burst),
            summary,
        })
    }
}

/// Build a fixed offset from a whole number of minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, ConfigError> {
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(ConfigError::OffsetOutOfRange(minutes));
    }

    FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::OffsetOutOfRange(minutes))
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}
