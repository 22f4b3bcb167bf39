use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use std::collections::{BTreeMap, BTreeSet};

use super::models::{MonthlyStats, RunHighlight, Streaks};
use crate::activities::models::LocalizedActivity;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Minutes per kilometer. Zero distance yields `f64::INFINITY` so the run
/// always compares as the slowest.
pub fn pace_min_per_km(moving_time_seconds: u64, distance_meters: f64) -> f64 {
    let distance_km = distance_meters / 1000.0;

    if distance_km > 0.0 {
        (moving_time_seconds as f64 / 60.0) / distance_km
    } else {
        f64::INFINITY
    }
}

/// Early-bird window: [05:00, 09:00).
pub fn is_early(hour: u32) -> bool {
    (5..9).contains(&hour)
}

/// Night-owl window: [20:00, 05:00) wrapping midnight.
pub fn is_night(hour: u32) -> bool {
    hour >= 20 || hour < 5
}

/// Longest run of consecutive days, and the run still alive at `today`.
///
/// The current streak counts only if the latest date is `today` or the day
/// before.
pub fn compute_streaks(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Streaks {
    let mut previous: Option<NaiveDate> = None;
    let mut temp_streak = 0;
    let mut max_streak = 0;

    for &date in dates {
        temp_streak = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => temp_streak + 1,
            _ => 1,
        };
        max_streak = max_streak.max(temp_streak);
        previous = Some(date);
    }

    let current = match previous {
        Some(last) if (0..=1).contains(&today.signed_duration_since(last).num_days()) => {
            temp_streak
        }
        _ => 0,
    };

    Streaks {
        current,
        max: max_streak,
    }
}

/// Most frequent weekday and its count. Ties go to the earlier weekday,
/// Monday first.
pub fn favorite_weekday<I>(weekdays: I) -> Option<(Weekday, u32)>
where
    I: IntoIterator<Item = Weekday>,
{
    let mut counts = [0u32; 7];

    for day in weekdays {
        counts[day.num_days_from_monday() as usize] += 1;
    }

    let mut best: Option<(Weekday, u32)> = None;

    for (day, &count) in WEEK.iter().zip(counts.iter()) {
        if count > 0 && best.map_or(true, |(_, top)| count > top) {
            best = Some((*day, count));
        }
    }

    best
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn monthly_breakdown(runs: &[LocalizedActivity]) -> BTreeMap<String, MonthlyStats> {
    let mut months: BTreeMap<String, MonthlyStats> = BTreeMap::new();

    for run in runs {
        let key = run.local_date_time.format("%Y-%m").to_string();
        let entry = months.entry(key).or_default();

        entry.distance_km += run.record.distance_km();
        entry.count += 1;
        entry.time_seconds = entry.time_seconds.saturating_add(run.record.moving_time_seconds);
    }

    months
}

/// First run with the lowest pace. Zero-distance runs never qualify.
pub fn select_fastest<'a, 'r>(
    runs: &'a [LocalizedActivity<'r>],
) -> Option<&'a LocalizedActivity<'r>> {
    let mut fastest: Option<(&LocalizedActivity, f64)> = None;

    for run in runs {
        let pace = pace_min_per_km(run.record.moving_time_seconds, run.record.distance_meters);

        if !pace.is_finite() {
            continue;
        }

        if fastest.map_or(true, |(_, best)| pace < best) {
            fastest = Some((run, pace));
        }
    }

    fastest.map(|(run, _)| run)
}

/// First run with the greatest distance.
pub fn select_longest<'a, 'r>(
    runs: &'a [LocalizedActivity<'r>],
) -> Option<&'a LocalizedActivity<'r>> {
    runs.iter().fold(None, |longest, run| match longest {
        Some(best) if run.record.distance_meters <= best.record.distance_meters => Some(best),
        _ => Some(run),
    })
}

pub fn highlight(run: &LocalizedActivity) -> RunHighlight {
    let pace = pace_min_per_km(run.record.moving_time_seconds, run.record.distance_meters);

    RunHighlight {
        name: run.record.name.clone(),
        distance_km: run.record.distance_km(),
        moving_time_seconds: run.record.moving_time_seconds,
        pace_min_per_km: pace.is_finite().then_some(pace),
        local_date_time: run.local_date_time.naive_local(),
        display_date: run
            .local_date_time
            .format("%d %b %Y, %I:%M %p")
            .to_string(),
    }
}

pub fn local_hour(run: &LocalizedActivity) -> u32 {
    run.local_date_time.hour()
}

pub fn local_date(run: &LocalizedActivity) -> NaiveDate {
    run.local_date_time.date_naive()
}

pub fn local_weekday(run: &LocalizedActivity) -> Weekday {
    run.local_date_time.weekday()
}
