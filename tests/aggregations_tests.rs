#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{FixedOffset, NaiveDate, Weekday};
    use run_summary::{
        activities::models::ActivityRecord,
        aggregate::{
            summarize, summarize_report, summarize_value,
            utils::{compute_streaks, favorite_weekday, is_early, is_night, pace_min_per_km},
        },
        config::SummaryConfig,
        error::SummaryError,
    };
    use serde_json::json;

    fn create_activity(
        start: &str,
        activity_type: &str,
        meters: f64,
        seconds: u64,
    ) -> ActivityRecord {
        ActivityRecord {
            activity_type: activity_type.to_string(),
            start_time_utc: start.to_string(),
            distance_meters: meters,
            moving_time_seconds: seconds,
            name: format!("{} at {}", activity_type, start),
        }
    }

    fn run(start: &str, meters: f64, seconds: u64) -> ActivityRecord {
        create_activity(start, "Run", meters, seconds)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn utc_config() -> SummaryConfig {
        SummaryConfig {
            utc_offset: FixedOffset::east_opt(0).unwrap(),
            ..SummaryConfig::default()
        }
    }

    fn three_consecutive_days() -> Vec<ActivityRecord> {
        vec![
            run("2025-01-01T01:00:00Z", 5000.0, 1800),
            run("2025-01-02T01:00:00Z", 5000.0, 1800),
            run("2025-01-03T01:00:00Z", 5000.0, 1800),
        ]
    }

    #[test]
    fn test_consecutive_days_totals_and_streaks() {
        let config = SummaryConfig::default();
        let stats = summarize(&three_consecutive_days(), &config, date("2025-01-03")).unwrap();

        assert_eq!(stats.total_distance_km, 15.0);
        assert_eq!(stats.total_time_hours, 1.5);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.max_streak, 3);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.average_pace_min_per_km, 6.0);
        assert_eq!(stats.skipped_records, 0);
    }

    #[test]
    fn test_current_streak_depends_on_today() {
        let activities = three_consecutive_days();
        let config = SummaryConfig::default();

        let current = |today: &str| {
            summarize(&activities, &config, date(today))
                .unwrap()
                .current_streak
        };

        assert_eq!(current("2025-01-03"), 3);
        assert_eq!(current("2025-01-04"), 3);
        assert_eq!(current("2025-01-05"), 0);
        assert_eq!(current("2024-12-31"), 0);
    }

    #[test]
    fn test_zero_distance_run_never_fastest() {
        let activities = vec![
            run("2025-03-01T02:00:00Z", 0.0, 600),
            run("2025-03-02T02:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-03-10")).unwrap();
        let fastest = stats.fastest.expect("a run with distance should be fastest");

        assert_eq!(fastest.name, activities[1].name);
        assert_eq!(fastest.pace_min_per_km, Some(5.0));
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_distance_km, 5.0);
        // 35 minutes over 5 km
        assert!((stats.average_pace_min_per_km - 7.0).abs() < 1e-9);
        assert_eq!(stats.longest.name, activities[1].name);
    }

    #[test]
    fn test_all_zero_distance_runs() {
        let activities = vec![
            run("2025-03-01T02:00:00Z", 0.0, 600),
            run("2025-03-02T02:00:00Z", 0.0, 900),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-03-10")).unwrap();

        assert!(stats.fastest.is_none());
        assert_eq!(stats.longest.name, activities[0].name);
        assert_eq!(stats.longest.pace_min_per_km, None);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_distance_km, 0.0);
        assert_eq!(stats.average_pace_min_per_km, 0.0);
    }

    #[test]
    fn test_fastest_and_longest_selection() {
        let activities = vec![
            run("2025-04-01T02:00:00Z", 10000.0, 3300),
            run("2025-04-02T02:00:00Z", 5000.0, 1450),
            run("2025-04-03T02:00:00Z", 21100.0, 7600),
            run("2025-04-04T02:00:00Z", 3000.0, 1200),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-04-04")).unwrap();
        let fastest = stats.fastest.unwrap();

        for activity in &activities {
            let pace = pace_min_per_km(activity.moving_time_seconds, activity.distance_meters);
            assert!(fastest.pace_min_per_km.unwrap() <= pace);
            assert!(stats.longest.distance_km >= activity.distance_km());
        }

        assert_eq!(fastest.name, activities[1].name);
        assert_eq!(stats.longest.name, activities[2].name);
        assert_eq!(stats.longest.moving_time_seconds, 7600);
    }

    #[test]
    fn test_ties_keep_first_encountered_run() {
        let activities = vec![
            run("2025-04-01T02:00:00Z", 10000.0, 3000),
            run("2025-04-02T02:00:00Z", 10000.0, 3000),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-04-02")).unwrap();

        assert_eq!(stats.longest.name, activities[0].name);
        assert_eq!(stats.fastest.unwrap().name, activities[0].name);
    }

    #[test]
    fn test_boundary_hours() {
        let activities = vec![
            run("2025-05-01T04:00:00Z", 5000.0, 1500),
            run("2025-05-02T05:00:00Z", 5000.0, 1500),
            run("2025-05-03T08:59:00Z", 5000.0, 1500),
            run("2025-05-04T09:00:00Z", 5000.0, 1500),
            run("2025-05-05T19:59:00Z", 5000.0, 1500),
            run("2025-05-06T20:00:00Z", 5000.0, 1500),
            run("2025-05-07T00:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &utc_config(), date("2025-05-07")).unwrap();

        assert_eq!(stats.early_count, 2);
        assert_eq!(stats.night_count, 3);
    }

    #[test]
    fn test_hour_classification() {
        assert!(is_early(5));
        assert!(is_early(8));
        assert!(!is_early(9));
        assert!(!is_early(4));

        assert!(is_night(4));
        assert!(is_night(0));
        assert!(is_night(20));
        assert!(is_night(23));
        assert!(!is_night(9));
        assert!(!is_night(19));
        assert!(!is_night(5));
    }

    #[test]
    fn test_offset_moves_runs_across_days_and_months() {
        let activities = vec![run("2025-01-31T20:00:00Z", 5000.0, 1500)];

        let ist = summarize(&activities, &SummaryConfig::default(), date("2025-02-01")).unwrap();
        assert!(ist.monthly_breakdown.contains_key("2025-02"));
        assert_eq!(ist.night_count, 1);
        assert_eq!(ist.favorite_weekday, "Saturday");
        assert_eq!(ist.longest.display_date, "01 Feb 2025, 01:30 AM");

        let utc = summarize(&activities, &utc_config(), date("2025-02-01")).unwrap();
        assert!(utc.monthly_breakdown.contains_key("2025-01"));
        assert_eq!(utc.favorite_weekday, "Friday");
        assert_eq!(utc.longest.display_date, "31 Jan 2025, 08:00 PM");
    }

    #[test]
    fn test_monthly_breakdown_is_chronological() {
        let activities = vec![
            run("2025-03-10T02:00:00Z", 8000.0, 2400),
            run("2025-01-10T02:00:00Z", 5000.0, 1500),
            run("2025-02-10T02:00:00Z", 6000.0, 1800),
            run("2025-01-20T02:00:00Z", 4000.0, 1300),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-03-10")).unwrap();
        let months: Vec<&String> = stats.monthly_breakdown.keys().collect();

        assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);

        let january = &stats.monthly_breakdown["2025-01"];
        assert_eq!(january.count, 2);
        assert_eq!(january.distance_km, 9.0);
        assert_eq!(january.time_seconds, 2800);

        let serialized = serde_json::to_string(&stats).unwrap();
        let jan = serialized.find("\"2025-01\"").unwrap();
        let feb = serialized.find("\"2025-02\"").unwrap();
        let mar = serialized.find("\"2025-03\"").unwrap();
        assert!(jan < feb && feb < mar);
    }

    #[test]
    fn test_totals_match_sum_of_runs() {
        let activities = vec![
            run("2025-06-01T02:00:00Z", 5123.4, 1601),
            run("2025-06-03T02:00:00Z", 10042.7, 3120),
            create_activity("2025-06-04T02:00:00Z", "Ride", 40000.0, 5400),
            run("2025-06-05T02:00:00Z", 7777.7, 2555),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-06-05")).unwrap();
        let runs: Vec<&ActivityRecord> = activities
            .iter()
            .filter(|a| a.activity_type == "Run")
            .collect();

        let meters: f64 = runs.iter().map(|r| r.distance_meters).sum();
        let seconds: u64 = runs.iter().map(|r| r.moving_time_seconds).sum();

        assert!((stats.total_distance_km - meters / 1000.0).abs() < 1e-9);
        assert!((stats.total_time_hours - seconds as f64 / 3600.0).abs() < 1e-9);
        assert_eq!(stats.total_count, 3);

        let monthly_km: f64 = stats.monthly_breakdown.values().map(|m| m.distance_km).sum();
        assert!((monthly_km - stats.total_distance_km).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let activities = vec![
            run("2025-01-01T01:00:00Z", 5000.0, 1800),
            run("2025-01-05T14:00:00Z", 12000.0, 4000),
            run("2025-02-01T23:00:00Z", 0.0, 300),
        ];
        let snapshot = activities.clone();
        let config = SummaryConfig::default();

        let first = summarize(&activities, &config, date("2025-02-02"));
        let second = summarize(&activities, &config, date("2025-02-02"));

        assert_eq!(first, second);
        assert_eq!(activities, snapshot);
    }

    #[test]
    fn test_no_runs_returns_none() {
        assert!(summarize(&[], &SummaryConfig::default(), date("2025-01-01")).is_none());

        let rides = vec![create_activity("2025-01-01T01:00:00Z", "Ride", 30000.0, 3600)];
        assert!(summarize(&rides, &SummaryConfig::default(), date("2025-01-01")).is_none());
    }

    #[test]
    fn test_custom_activity_type() {
        let activities = vec![
            create_activity("2025-01-01T01:00:00Z", "Ride", 30000.0, 3600),
            run("2025-01-01T03:00:00Z", 5000.0, 1500),
        ];
        let config = SummaryConfig {
            activity_type: "Ride".to_string(),
            ..SummaryConfig::default()
        };

        let stats = summarize(&activities, &config, date("2025-01-01")).unwrap();

        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.total_distance_km, 30.0);
    }

    #[test]
    fn test_malformed_timestamp_is_skipped() {
        let activities = vec![
            run("not a timestamp", 5000.0, 1500),
            run("", 5000.0, 1500),
            run("2025-01-01T01:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-01-01")).unwrap();

        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.skipped_records, 2);
    }

    #[test]
    fn test_negative_distance_is_skipped() {
        let activities = vec![
            run("2025-01-01T01:00:00Z", -10.0, 1500),
            run("2025-01-02T01:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-01-02")).unwrap();

        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.skipped_records, 1);
    }

    #[test]
    fn test_target_year_uses_local_calendar() {
        let activities = vec![
            run("2024-12-31T20:00:00Z", 5000.0, 1500),
            run("2024-12-30T02:00:00Z", 5000.0, 1500),
            run("2025-03-01T02:00:00Z", 5000.0, 1500),
        ];
        let config = SummaryConfig::default().with_target_year(Some(2025));

        let stats = summarize(&activities, &config, date("2025-03-01")).unwrap();

        assert_eq!(stats.total_count, 2);
        assert!(stats.monthly_breakdown.contains_key("2025-01"));

        let config = SummaryConfig::default().with_target_year(Some(2023));
        assert!(summarize(&activities, &config, date("2025-03-01")).is_none());
    }

    #[test]
    fn test_favorite_weekday_ties_go_to_earliest_weekday() {
        // 2025-01-01 is a Wednesday, 2025-01-06 a Monday
        let activities = vec![
            run("2025-01-01T01:00:00Z", 5000.0, 1500),
            run("2025-01-06T01:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-01-06")).unwrap();

        assert_eq!(stats.favorite_weekday, "Monday");
        assert_eq!(stats.favorite_weekday_count, 1);
    }

    #[test]
    fn test_favorite_weekday_highest_count() {
        let activities = vec![
            run("2025-01-06T01:00:00Z", 5000.0, 1500),
            run("2025-01-04T01:00:00Z", 5000.0, 1500),
            run("2025-01-11T01:00:00Z", 5000.0, 1500),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-01-11")).unwrap();

        assert_eq!(stats.favorite_weekday, "Saturday");
        assert_eq!(stats.favorite_weekday_count, 2);
    }

    #[test]
    fn test_favorite_weekday_helper() {
        assert_eq!(favorite_weekday(Vec::<Weekday>::new()), None);
        assert_eq!(
            favorite_weekday(vec![Weekday::Sun, Weekday::Fri, Weekday::Sun]),
            Some((Weekday::Sun, 2))
        );
        assert_eq!(
            favorite_weekday(vec![Weekday::Sun, Weekday::Tue]),
            Some((Weekday::Tue, 1))
        );
    }

    #[test]
    fn test_streaks_with_gaps() {
        let dates: BTreeSet<NaiveDate> = [
            "2025-01-01",
            "2025-01-02",
            "2025-01-03",
            "2025-01-05",
            "2025-01-06",
        ]
        .iter()
        .map(|d| date(d))
        .collect();

        let streaks = compute_streaks(&dates, date("2025-01-06"));

        assert_eq!(streaks.max, 3);
        assert_eq!(streaks.current, 2);
    }

    #[test]
    fn test_streak_edge_cases() {
        let empty = BTreeSet::new();
        let streaks = compute_streaks(&empty, date("2025-01-01"));
        assert_eq!((streaks.current, streaks.max), (0, 0));

        let single: BTreeSet<NaiveDate> = [date("2025-01-01")].into_iter().collect();
        assert_eq!(compute_streaks(&single, date("2025-01-02")).max, 1);
        assert_eq!(compute_streaks(&single, date("2025-01-02")).current, 1);
        assert_eq!(compute_streaks(&single, date("2025-01-03")).current, 0);
    }

    #[test]
    fn test_streak_of_consecutive_dates_spans_all() {
        let start = date("2024-12-20");
        let dates: BTreeSet<NaiveDate> = (0..30)
            .map(|i| start + chrono::Duration::days(i))
            .collect();

        let streaks = compute_streaks(&dates, date("2025-06-01"));

        assert_eq!(streaks.max, 30);
        assert_eq!(streaks.current, 0);
    }

    #[test]
    fn test_multiple_runs_same_day_count_once_for_streaks() {
        let activities = vec![
            run("2025-01-01T01:00:00Z", 5000.0, 1500),
            run("2025-01-01T12:00:00Z", 3000.0, 1000),
        ];

        let stats = summarize(&activities, &SummaryConfig::default(), date("2025-01-01")).unwrap();

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_summarize_value_accepts_provider_shape() {
        let input = json!([
            {"type": "Run", "start_date": "2025-01-01T01:00:00Z", "distance": 5000.0, "moving_time": 1800, "name": "Morning Run"},
            {"type": "Ride", "start_date": "2025-01-01T05:00:00Z", "distance": 20000.0, "moving_time": 3600, "name": "Ride"},
            {"type": "Run", "start_date": "2025-01-02T01:00:00Z", "distance": "far", "moving_time": 1800},
            {"type": "Run", "start_date": "2025-01-02T01:00:00Z", "moving_time": 900}
        ]);

        let stats = summarize_value(&input, &SummaryConfig::default(), date("2025-01-02"))
            .unwrap()
            .unwrap();

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.skipped_records, 1);
        assert_eq!(stats.total_distance_km, 5.0);
        assert_eq!(stats.longest.name, "Morning Run");
        assert_eq!(stats.max_streak, 2);
    }

    #[test]
    fn test_summarize_value_rejects_non_list_input() {
        let config = SummaryConfig::default();
        let today = date("2025-01-01");

        for input in [json!({"type": "Run"}), json!("runs"), json!(null), json!([1, 2, 3])] {
            assert!(matches!(
                summarize_value(&input, &config, today),
                Err(SummaryError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_summarize_value_empty_list_is_not_an_error() {
        let result = summarize_value(&json!([]), &SummaryConfig::default(), date("2025-01-01"));

        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_all_runs_malformed_keeps_skip_count() {
        let input = json!([
            {"type": "Run", "start_date": "garbage", "distance": 5000.0, "moving_time": 1800},
            {"type": "Run", "start_date": "2025-01-01T01:00:00Z", "distance": "far", "moving_time": 1800}
        ]);

        let report =
            summarize_report(&input, &SummaryConfig::default(), date("2025-01-01")).unwrap();

        assert_eq!(report.statistics, None);
        assert_eq!(report.skipped_records, 2);
    }

    #[test]
    fn test_large_moving_times_saturate() {
        let activities = vec![
            run("2025-01-01T01:00:00Z", 5000.0, u64::MAX),
            run("2025-01-02T01:00:00Z", 5000.0, 10),
        ];

        let stats = summarize(&activities, &utc_config(), date("2025-01-02")).unwrap();

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_time_hours, u64::MAX as f64 / 3600.0);
        assert_eq!(stats.monthly_breakdown["2025-01"].time_seconds, u64::MAX);
    }

    #[test]
    fn test_null_name_run_is_counted() {
        let input = json!([
            {"type": "Run", "start_date": "2025-01-01T01:00:00Z", "distance": 5000.0, "moving_time": 1800, "name": null}
        ]);

        let stats = summarize_value(&input, &SummaryConfig::default(), date("2025-01-01"))
            .unwrap()
            .unwrap();

        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.skipped_records, 0);
        assert_eq!(stats.longest.name, "");
    }

    #[test]
    fn test_default_config_uses_india_offset() {
        let config = SummaryConfig::default();

        assert_eq!(config.utc_offset.local_minus_utc(), 330 * 60);
        assert_eq!(config.activity_type, "Run");
        assert_eq!(config.target_year, None);
    }
}
